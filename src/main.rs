use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_duck::audio::{AudioSink, SoundEffect, TerminalBell};
use flappy_duck::build_info;
use flappy_duck::core::config::{base_config, parse_args, save_config, USAGE};
use flappy_duck::core::constants::{LOG_FILE_NAME, REALTIME_FRAME_MS};
use flappy_duck::input::{map_key_event, map_mouse_event, GameInput, InputResult, InputState};
use flappy_duck::logging::init_tracing;
use flappy_duck::ui::render_game;
use flappy_duck::utils::paths::app_path;
use flappy_duck::{AppError, CliCommand, FlappyScene, GameConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

fn main() {
    if let Err(e) = run() {
        eprintln!("flappy-duck: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match parse_args(&args, base_config()) {
        Ok(CliCommand::Run(config)) => config,
        Ok(CliCommand::SaveConfig(config)) => {
            let path = save_config(&config)?;
            println!("Saved config to {}", path.display());
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Run 'flappy-duck --help' for usage.");
            return Err(e.into());
        }
    };

    match app_path(LOG_FILE_NAME) {
        Ok(path) => {
            if let Err(e) = init_tracing(&path) {
                eprintln!("Warning: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    info!(
        version = %build_info::version_string(),
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "Starting"
    );

    let scene = FlappyScene::new(config.clone())?;

    match config.serve_port {
        Some(port) => run_served(scene, &config, port),
        None => {
            let mut terminal = setup_terminal(io::stdout())?;
            let result = game_loop(&mut terminal, scene, config.muted, || None);
            restore_terminal(&mut terminal)?;
            result
        }
    }
}

#[cfg(feature = "web")]
fn run_served(scene: FlappyScene, config: &GameConfig, port: u16) -> Result<(), AppError> {
    use flappy_duck::web::{start_web_server, TeeWriter, WebServer};
    use std::sync::Arc;

    let runtime = tokio::runtime::Runtime::new()?;
    let server = Arc::new(WebServer::new());
    let listener = Arc::clone(&server);
    runtime.spawn(async move {
        if let Err(e) = start_web_server(port, listener).await {
            warn!(port, error = %e, "Web server stopped");
        }
    });

    let mut terminal = setup_terminal(TeeWriter::stdout(server.output_sender()))?;
    let result = game_loop(&mut terminal, scene, config.muted, || {
        server.try_recv_input_sync()
    });
    restore_terminal(&mut terminal)?;
    runtime.shutdown_background();
    result
}

#[cfg(not(feature = "web"))]
fn run_served(_scene: FlappyScene, _config: &GameConfig, port: u16) -> Result<(), AppError> {
    warn!(port, "--serve requested without web support");
    Err(AppError::WebUnavailable)
}

fn setup_terminal<W: Write>(mut out: W) -> io::Result<Terminal<CrosstermBackend<W>>> {
    enable_raw_mode()?;
    out.execute(EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

fn restore_terminal<W: Write>(terminal: &mut Terminal<CrosstermBackend<W>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Draw, gather input, advance the scene by the real time that passed.
fn game_loop<W, F>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    mut scene: FlappyScene,
    muted: bool,
    mut remote_input: F,
) -> Result<(), AppError>
where
    W: Write,
    F: FnMut() -> Option<GameInput>,
{
    let mut input_state = InputState::new();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| render_game(f, f.size(), &scene, input_state.quit_pending))?;

        let mut inputs = Vec::new();
        if event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
            loop {
                let input = match event::read()? {
                    Event::Key(key) => map_key_event(key),
                    Event::Mouse(mouse) => map_mouse_event(mouse),
                    _ => None,
                };
                inputs.extend(input);
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        while let Some(input) = remote_input() {
            inputs.push(input);
        }

        let mut sounds = Vec::new();
        for input in inputs {
            match input_state.process(&mut scene, input) {
                InputResult::Continue(cues) => sounds.extend(cues),
                InputResult::Quit => {
                    info!(
                        best = scene.best_score(),
                        rounds = scene.rounds_played(),
                        "Quit"
                    );
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        sounds.extend(scene.advance(elapsed).sounds);

        play_sounds(terminal.backend_mut(), muted, &sounds);
    }
}

fn play_sounds<W: Write>(out: W, muted: bool, sounds: &[SoundEffect]) {
    let mut bell = TerminalBell::new(out, muted);
    for &effect in sounds {
        if let Err(e) = bell.play(effect) {
            warn!(?effect, error = %e, "Could not play sound");
        }
    }
}
