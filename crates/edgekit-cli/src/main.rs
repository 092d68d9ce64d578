use std::path::{Path, PathBuf};
use std::time::Instant;

use argh::FromArgs;

use edgekit::imgproc::{
    parallel::ExecutionStrategy, Mapper, Pipeline, TransformEngine, TransformKind,
    TransformOptions,
};

mod io;

use io::IoError;

#[derive(FromArgs)]
/// Detect edges in a png or jpeg image
struct Args {
    /// path to the input image
    #[argh(positional)]
    image_path: Option<PathBuf>,

    /// comma separated transforms to apply, `all` runs the edge pipeline
    #[argh(option, short = 'f', default = "String::from(\"all\")")]
    functions: String,

    /// write the image produced by every stage next to the input
    #[argh(switch, short = 'o')]
    output: bool,

    /// radius of the gaussian kernel
    #[argh(option, default = "TransformOptions::DEFAULT_GAUSSIAN_RADIUS")]
    radius: usize,

    /// run every stage through square windows of this size
    #[argh(option)]
    window_size: Option<usize>,

    /// number of worker threads, defaults to the available cores
    #[argh(option)]
    threads: Option<usize>,

    /// print the available transforms and exit
    #[argh(switch)]
    list: bool,
}

/// Run the requested pipeline on one file and return the written paths.
fn process(args: &Args, image_path: &Path) -> Result<Vec<PathBuf>, IoError> {
    let strategy = match args.threads {
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::available(),
    };
    let engine = TransformEngine::new(TransformOptions {
        gaussian_radius: args.radius,
        strategy,
        ..Default::default()
    })?;

    let mut pipeline = Pipeline::from_names(&args.functions)?;
    if let Some(window_size) = args.window_size {
        pipeline = pipeline.with_mapper(Mapper::Window(window_size))?;
    }

    let image = io::read_image(image_path)?;
    log::info!(
        "loaded {} ({}x{}), running {} stage(s)",
        image_path.display(),
        image.width(),
        image.height(),
        pipeline.stages().len()
    );

    let start = Instant::now();
    let mut written = Vec::new();
    let result = pipeline.run_inspect(&engine, image, |kind, stage| -> Result<(), IoError> {
        if args.output {
            let path = io::derived_path(image_path, kind.name())?;
            io::write_image(&path, stage)?;
            log::info!("{kind}: wrote {}", path.display());
            written.push(path);
        }
        Ok(())
    })?;
    log::info!("pipeline done in {:?}", start.elapsed());

    if !args.output {
        let path = io::derived_path(image_path, "output")?;
        io::write_image(&path, &result)?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    if args.list {
        for name in TransformKind::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(image_path) = args.image_path.clone() else {
        return Err("missing image path, see --help".into());
    };

    process(&args, &image_path)?;

    Ok(())
}
