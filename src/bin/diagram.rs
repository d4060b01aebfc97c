use diagram_rs::api::{DiagramEngineConfig, EXPORT_VIEWPORT, export_png};
use diagram_rs::input::{CommandLine, load_dataset};
use diagram_rs::telemetry::init_default_tracing;

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        eprintln!("\n{}", usage_message());
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command_line = CommandLine::parse(&args).map_err(|err| err.to_string())?;

    let dataset =
        load_dataset(command_line.kind, &command_line.input).map_err(|err| err.to_string())?;
    let config = DiagramEngineConfig::new(EXPORT_VIEWPORT);

    #[cfg(feature = "gtk4-adapter")]
    let window_dataset = dataset.clone();

    export_png(dataset, config, &command_line.output).map_err(|err| err.to_string())?;
    println!(
        "{} diagram written to {}",
        command_line.kind,
        command_line.output.display()
    );

    #[cfg(feature = "gtk4-adapter")]
    diagram_rs::platform_gtk::run_window(window_dataset, config).map_err(|err| err.to_string())?;

    Ok(())
}

fn usage_message() -> &'static str {
    "usage: diagram <type> <input> [output]\n\
     types: circle|pie, barchart|bar, plot|scatter, polar|radar, tree\n\
     output defaults to Diagram.png"
}
