//! CLI logic for the Arguendo diagram tool.
//!
//! Loads a diagram from a JSON document or stamps a built-in template,
//! optionally rearranges it onto a grid, and exports it as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use arguendo::{
    ArguendoError, Workspace, document::DiagramDocument, export::svg::SvgSurface,
    layout::GridLayout, template,
};

/// Run the Arguendo CLI application
///
/// Builds a workspace from the requested source, applies the optional grid
/// layout, and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `ArguendoError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Unknown template names
pub fn run(args: &Args) -> Result<(), ArguendoError> {
    if args.list_templates {
        for info in template::available_templates() {
            println!("{}: {} ({})", info.id, info.name, info.description);
        }
        return Ok(());
    }

    info!(output_path = args.output; "Building diagram");

    let app_config = config::load_config(args.config.as_ref())?;
    let mut workspace =
        Workspace::with_config(SvgSurface::new(), app_config.viewport().clone());

    if let Some(name) = &args.template {
        info!(template = name.as_str(); "Applying template");
        template::template_by_name(name)?.apply_to(&mut workspace);
    }

    if let Some(input) = &args.input {
        info!(input_path = input.as_str(); "Loading document");
        let raw = fs::read_to_string(input)?;
        DiagramDocument::from_json(&raw)?.apply_to(&mut workspace);
    }

    if args.auto_layout {
        info!("Applying grid layout");
        GridLayout::from_config(app_config.layout()).apply_to(&mut workspace);
    }

    if let Some(path) = &args.export_json {
        info!(export_path = path.as_str(); "Writing document");
        let json = DiagramDocument::from_model(workspace.model()).to_json()?;
        fs::write(path, json)?;
    }

    let background = app_config
        .style()
        .background_color()
        .map_err(|msg| ArguendoError::Export(msg.into()))?;

    workspace
        .surface()
        .save(Path::new(&args.output), background.as_ref())?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(template: Option<&str>, input: Option<&str>, output: &str) -> Args {
        Args {
            input: input.map(str::to_string),
            template: template.map(str::to_string),
            list_templates: false,
            output: output.to_string(),
            auto_layout: false,
            export_json: None,
            config: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_render_template_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.svg");

        let args = args_for(
            Some(template::STANDARD_ASSESSMENT),
            None,
            output.to_str().unwrap(),
        );
        run(&args).unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("edge-group-"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.svg");

        let args = args_for(Some("no-such-template"), None, output.to_str().unwrap());

        assert!(matches!(
            run(&args),
            Err(ArguendoError::Template(_))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_render_document_with_layout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("diagram.json");
        let output = dir.path().join("out.svg");

        fs::write(
            &input,
            r#"{
                "version": "1.0",
                "createdAt": "2026-01-01T00:00:00Z",
                "nodes": [
                    { "id": "a", "title": "first", "text": "", "x": 900, "y": 900 },
                    { "id": "b", "title": "second", "text": "", "x": 901, "y": 901 }
                ],
                "edges": [
                    { "id": "ab", "sourceNodeId": "a", "targetNodeId": "b", "conditionMet": "+", "probability": 1.0 }
                ]
            }"#,
        )
        .unwrap();

        let mut args = args_for(None, Some(input.to_str().unwrap()), output.to_str().unwrap());
        args.auto_layout = true;
        run(&args).unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("edge-group-ab"));
        // Grid layout pulled the nodes back to the origin area.
        assert!(svg.contains("x=\"50\""));
    }

    #[test]
    fn test_export_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.svg");
        let exported = dir.path().join("exported.json");

        let mut args = args_for(
            Some(template::STANDARD_ASSESSMENT),
            None,
            output.to_str().unwrap(),
        );
        args.export_json = Some(exported.to_str().unwrap().to_string());
        run(&args).unwrap();

        let raw = fs::read_to_string(&exported).unwrap();
        let document = DiagramDocument::from_json(&raw).unwrap();
        assert_eq!(document.nodes.len(), 7);
        assert_eq!(document.edges.len(), 6);
    }

    #[test]
    fn test_malformed_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, "{ not json").unwrap();

        let args = args_for(
            None,
            Some(input.to_str().unwrap()),
            dir.path().join("out.svg").to_str().unwrap(),
        );

        assert!(matches!(run(&args), Err(ArguendoError::Document(_))));
    }
}
