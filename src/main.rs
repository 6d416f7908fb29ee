use marker_engine::{EngineConfig, InMemoryStore, JsonFileStore, MarkerEngine, PersistenceStore};
use std::error::Error;

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config <engine.json>] [--state <dir>] <markers.geojson> [lon lat [heading]]"
    )
}

struct Args {
    config: Option<String>,
    state_dir: Option<String>,
    dataset: String,
    location: Option<(f64, f64)>,
    heading: Option<f64>,
}

fn parse_args(args: &[String]) -> Result<Args, Box<dyn Error>> {
    let program = args.first().map_or("marker-engine", |s| s.as_str());
    let mut config = None;
    let mut state_dir = None;
    let mut positional = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config = Some(iter.next().ok_or_else(|| usage(program))?.clone()),
            "--state" => state_dir = Some(iter.next().ok_or_else(|| usage(program))?.clone()),
            "-h" | "--help" => return Err(usage(program).into()),
            _ => positional.push(arg.as_str()),
        }
    }

    let (dataset, location, heading) = match positional.as_slice() {
        [dataset] => (dataset, None, None),
        [dataset, lon, lat] => (dataset, Some((lon.parse::<f64>()?, lat.parse::<f64>()?)), None),
        [dataset, lon, lat, heading] => (dataset, Some((lon.parse::<f64>()?, lat.parse::<f64>()?)), Some(heading.parse::<f64>()?)),
        _ => return Err(usage(program).into()),
    };

    Ok(Args {
        config,
        state_dir,
        dataset: dataset.to_string(),
        location,
        heading,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return Err("Invalid arguments".into());
        }
    };

    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    let persistence: Box<dyn PersistenceStore> = match &args.state_dir {
        Some(dir) => Box::new(JsonFileStore::open(dir)?),
        None => Box::new(InMemoryStore::new()),
    };

    let json = std::fs::read_to_string(&args.dataset)?;
    let mut engine = MarkerEngine::from_geojson(&json, config, persistence)?;

    if let Some((lon, lat)) = args.location {
        engine.update_location(lon, lat)?;
    }

    let filter = engine.filter();
    println!(
        "{} of {} markers (search \"{}\", county {}, favorites only: {})",
        engine.visible_count(),
        engine.len(),
        filter.search_text,
        filter.category.as_str(),
        filter.favorites_only
    );
    for entry in engine.list_entries() {
        println!("{}", entry);
    }

    let viewport = engine.view_viewport();
    println!(
        "Map: centre ({:.4}, {:.4}), span {:.4} x {:.4} deg, {:?} style",
        viewport.center_lat,
        viewport.center_lon,
        viewport.lat_span,
        viewport.lon_span,
        engine.map_style_for(&viewport)
    );

    if let (Some((lon, lat)), Some(heading)) = (args.location, args.heading) {
        let frame = engine.update_ar_frame(lon, lat, Some(heading))?;
        println!("AR frame at heading {:.1} deg: {} markers", heading, frame.placements.len());
        for placement in &frame.placements {
            println!(
                "  {:<12} x={:>9.1} m  z={:>9.1} m  scale={:.0}",
                placement.marker_id.as_str(),
                placement.x,
                placement.z,
                placement.scale
            );
        }
    }

    Ok(())
}
