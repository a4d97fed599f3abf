use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use rootbasin::core::functions::catalog::{REAL_PRESETS, real_preset};
use rootbasin::{
    BasinCliController, BasinRequest, Bracket, FunctionCatalog, IterateCliController, IterationConfig,
    IterationRequest, Method, PpmFilePresenter, ViewWindow,
};

/// Step-by-step root finding and basin-of-attraction renders.
#[derive(Parser, Debug)]
#[command(name = "rootbasin", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one real root-finding method and print every step.
    Iterate(IterateArgs),
    /// Render the basins of attraction of a complex polynomial to PPM.
    Basin(BasinArgs),
}

#[derive(Args, Debug)]
struct IterateArgs {
    /// Preset function (cubic, x-sin, exp, dottie).
    #[arg(long, default_value = "cubic")]
    preset: String,

    /// Function text; overrides the preset's function.
    #[arg(long)]
    expr: Option<String>,

    /// Fixed-point map for picard and aitken.
    #[arg(long)]
    phi: Option<String>,

    #[arg(long, default_value_t = Method::Newton)]
    method: Method,

    #[arg(long)]
    x0: Option<f64>,

    #[arg(long)]
    x1: Option<f64>,

    /// Bracket start for bisection and regula falsi.
    #[arg(long, allow_hyphen_values = true)]
    a: Option<f64>,

    /// Bracket end for bisection and regula falsi.
    #[arg(long, allow_hyphen_values = true)]
    b: Option<f64>,

    /// Damping factor of newton-damped.
    #[arg(long, default_value_t = 1.0)]
    lambda: f64,

    /// Stop once a step moves less than this.
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,

    #[arg(long, default_value_t = 100)]
    max_steps: usize,

    /// Delay between steps in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

#[derive(Args, Debug)]
struct BasinArgs {
    /// JSON render request; flags below are ignored when given.
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,

    #[arg(long, default_value = "z^3 - 1")]
    expr: String,

    #[arg(long, default_value_t = Method::Newton)]
    method: Method,

    /// Fixed-point map for picard.
    #[arg(long)]
    phi: Option<String>,

    #[arg(long, default_value_t = 400)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    #[arg(long, default_value_t = 50)]
    max_iter: u32,

    #[arg(long, default_value_t = 1e-6)]
    tol: f64,

    /// View as min_re,max_re,min_im,max_im.
    #[arg(long, value_delimiter = ',', num_args = 4, allow_hyphen_values = true)]
    view: Option<Vec<f64>>,

    #[arg(long, default_value = "output/basins.ppm")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Iterate(args) => iterate(args),
        Command::Basin(args) => basin(args),
    }
}

fn iterate(args: IterateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let preset = real_preset(&args.preset).ok_or_else(|| {
        let known: Vec<&str> = REAL_PRESETS.iter().map(|preset| preset.label).collect();
        format!("unknown preset {:?}; expected one of {}", args.preset, known.join(", "))
    })?;

    let config = IterationConfig {
        method: args.method,
        x0: args.x0.unwrap_or(preset.x0),
        x1: args.x1.unwrap_or(preset.x1),
        bracket: Bracket::new(args.a.unwrap_or(preset.bracket.a), args.b.unwrap_or(preset.bracket.b)),
        lambda: args.lambda,
        epsilon: args.epsilon,
        max_steps: Some(args.max_steps),
        cadence: Duration::from_millis(args.delay_ms),
        ..IterationConfig::default()
    };

    let mut request = IterationRequest::new(args.expr.as_deref().unwrap_or(preset.expr), config);
    request.phi_expr = args.phi;

    let mut controller = IterateCliController::new(std::io::stdout().lock());
    controller.run(&request, &FunctionCatalog::new())?;

    Ok(())
}

fn basin(args: BasinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = match &args.request {
        Some(path) => serde_json::from_str::<BasinRequest>(&fs::read_to_string(path)?)?,
        None => BasinRequest {
            expr: args.expr,
            method: args.method,
            width: args.width,
            height: args.height,
            max_iter: args.max_iter,
            tol: args.tol,
            view: match args.view.as_deref() {
                Some(&[min_re, max_re, min_im, max_im]) => ViewWindow::new(min_re, max_re, min_im, max_im)?,
                _ => ViewWindow::default(),
            },
            phi_expr: args.phi,
        },
    };

    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut controller = BasinCliController::new(PpmFilePresenter::new());
    controller.generate(&request, &FunctionCatalog::new())?;
    controller.write(&args.output)?;

    println!("Saved to {}", args.output.display());
    Ok(())
}
