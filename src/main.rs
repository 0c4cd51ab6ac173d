use dotenv::dotenv;
use gridfeat::infra::distance_map;
use gridfeat::{Direction, ExtractorKind, GameState, GameView, Layout};
use std::env;
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn get_env_var_i32(key: &str) -> Option<i32> {
    env::var(key).ok().and_then(|val| val.parse::<i32>().ok())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridfeat=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let layout_path = env::var("GRIDFEAT_LAYOUT")
        .map_err(|_| "GRIDFEAT_LAYOUT environment variable is required")?;
    let kind: ExtractorKind = env::var("GRIDFEAT_EXTRACTOR")
        .unwrap_or_else(|_| "simple".to_string())
        .parse()?;
    let scared_timer = get_env_var_i32("GRIDFEAT_SCARED").unwrap_or(0);
    let action = env::var("GRIDFEAT_ACTION")
        .ok()
        .map(|val| val.parse::<Direction>())
        .transpose()?;

    let layout = Layout::load(&layout_path)?;
    let state = GameState::from_layout(&layout).with_scared_ghosts(scared_timer);
    let extractor = kind.build();

    info!("Layout {} with {} extractor", layout_path, extractor.name());
    info!("- board size: {}x{}", state.walls.width, state.walls.height);
    info!("- food left: {}", state.food.count());
    info!(
        "- reachable cells: {}",
        distance_map(state.agent_position(), &state.walls).len()
    );
    let _ = writeln!(io::stdout(), "{}", state);

    let actions = match action {
        Some(action) => vec![action],
        None => state.legal_actions(),
    };

    for action in actions {
        match extractor.features(&state, action) {
            Ok(features) => info!("{:>5}: {}", action, features),
            Err(err) => warn!("{:>5}: {}", action, err),
        }
    }

    Ok(())
}
