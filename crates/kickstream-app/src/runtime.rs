//! Main loop: dispatch ticks, console input, status changes and Ctrl-C.

use kickstream_config::{config_to_json, KickstreamConfig};
use kickstream_live::LiveSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::console::{ConsoleCommand, HELP};
use crate::settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Executes operator commands against a session.
pub struct Console {
    config_json: String,
}

impl Console {
    pub fn new(config: &KickstreamConfig) -> Self {
        Self {
            config_json: config_to_json(config),
        }
    }

    async fn handle_line(&self, session: &mut LiveSession, line: &str) -> Flow {
        match ConsoleCommand::parse(line) {
            Ok(Some(command)) => self.execute(session, command).await,
            Ok(None) => Flow::Continue,
            Err(e) => {
                println!("{e} (type `help`)");
                Flow::Continue
            }
        }
    }

    pub async fn execute(&self, session: &mut LiveSession, command: ConsoleCommand) -> Flow {
        match command {
            ConsoleCommand::Like { subject } => {
                let accepted = session.simulate_like(&subject);
                report_simulated(accepted);
            }
            ConsoleCommand::Rose { subject, count } => {
                let accepted = session.simulate_rose_gift(&subject, count);
                report_simulated(accepted);
            }
            ConsoleCommand::Perfume { subject } => {
                let accepted = session.simulate_perfume_gift(&subject);
                report_simulated(accepted);
            }
            ConsoleCommand::Manual(name) => {
                if let Err(e) = session.run_command(&name) {
                    println!("{e}");
                }
            }
            ConsoleCommand::Status => {
                println!("{}", session.snapshot());
                for (position, entry) in session.queue().pending().enumerate() {
                    println!("  {}. {} x{}", position + 1, entry.subject, entry.combo_count);
                }
            }
            ConsoleCommand::Clear => {
                let dropped = session.queue_len();
                session.clear_queue();
                println!("dropped {dropped} queued combo(s)");
            }
            ConsoleCommand::Config => println!("{}", self.config_json),
            ConsoleCommand::Connect => {
                // Progress arrives on the status channel; ticks keep running.
                if !session.start_connection() {
                    println!("already connecting or connected");
                }
                println!("{}", session.status());
            }
            ConsoleCommand::Disconnect => {
                session.disconnect().await;
                println!("{}", session.status());
            }
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

/// Drive `session` until the operator quits or Ctrl-C arrives, then
/// disconnect.
pub async fn run(session: &mut LiveSession, config: &KickstreamConfig) {
    let console = Console::new(config);

    if config.connection.auto_connect {
        session.start_connection();
    } else {
        info!("auto_connect disabled, type `connect` to start");
    }

    let mut ticker = tokio::time::interval(settings::tick_period(config));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    let mut status_rx = session.subscribe_status();
    let mut status_open = true;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ctrl_c_armed = true;

    loop {
        tokio::select! {
            now = ticker.tick() => {
                session.tick(now - last_tick);
                last_tick = now;
            }

            changed = status_rx.changed(), if status_open => {
                if changed.is_err() {
                    status_open = false;
                    continue;
                }
                let status = status_rx.borrow_and_update().clone();
                info!(status = %status, "connection status changed");
            }

            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if console.handle_line(session, &line).await == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("stdin closed, console commands disabled");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read stdin");
                        stdin_open = false;
                    }
                }
            }

            result = &mut ctrl_c, if ctrl_c_armed => {
                match result {
                    Ok(()) => {
                        info!("interrupt received, shutting down");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to listen for Ctrl-C");
                        ctrl_c_armed = false;
                    }
                }
            }
        }
    }

    session.disconnect().await;
}

fn report_simulated(accepted: bool) {
    if !accepted {
        println!("simulators are disabled, restart with --test-mode");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use kickstream_live::{ConnectionConfig, ConnectionState, DispatcherState, SessionConfig};
    use tokio::net::TcpListener;

    use super::*;
    use crate::gameplay::ConsoleGameplay;

    fn session_with(
        config: SessionConfig,
        resolve_for: Duration,
    ) -> (LiveSession, Arc<ConsoleGameplay>) {
        let gameplay = Arc::new(ConsoleGameplay::new(resolve_for));
        (LiveSession::new(config, gameplay.clone()), gameplay)
    }

    fn session(test_mode: bool) -> (LiveSession, Arc<ConsoleGameplay>) {
        let config = SessionConfig {
            test_mode,
            ..SessionConfig::default()
        };
        session_with(config, Duration::from_secs(60))
    }

    fn console() -> Console {
        Console::new(&KickstreamConfig::default())
    }

    #[tokio::test]
    async fn simulated_rose_runs_combo() {
        let (mut session, gameplay) = session(true);
        let flow = console()
            .execute(
                &mut session,
                ConsoleCommand::Rose {
                    subject: "mai".into(),
                    count: 3,
                },
            )
            .await;
        assert_eq!(flow, Flow::Continue);
        assert_eq!(gameplay.combos(), 1);
        assert_eq!(session.dispatcher_state(), DispatcherState::Active);
    }

    #[tokio::test]
    async fn simulators_are_inert_without_test_mode() {
        let (mut session, gameplay) = session(false);
        let console = console();
        console
            .execute(
                &mut session,
                ConsoleCommand::Like {
                    subject: "an".into(),
                },
            )
            .await;
        console
            .execute(
                &mut session,
                ConsoleCommand::Perfume {
                    subject: "an".into(),
                },
            )
            .await;
        assert_eq!(session.hearts().tap_count(), 0);
        assert_eq!(gameplay.squads(), 0);
    }

    #[tokio::test]
    async fn manual_and_clear_commands() {
        let (mut session, gameplay) = session(true);
        let console = console();
        console
            .execute(&mut session, ConsoleCommand::Manual("squad".into()))
            .await;
        assert_eq!(gameplay.squads(), 1);

        session.enqueue_combo("a", 1);
        session.enqueue_combo("b", 1);
        assert_eq!(session.queue_len(), 1);
        console.execute(&mut session, ConsoleCommand::Clear).await;
        assert_eq!(session.queue_len(), 0);
    }

    #[tokio::test]
    async fn config_command_holds_effective_config() {
        let mut config = KickstreamConfig::default();
        config.hearts.capacity = 42;
        let console = Console::new(&config);
        assert!(console.config_json.contains("\"capacity\": 42"));

        let (mut session, _gameplay) = session(false);
        assert_eq!(
            console.execute(&mut session, ConsoleCommand::Config).await,
            Flow::Continue
        );
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let (mut session, _gameplay) = session(false);
        let console = console();
        assert_eq!(
            console.execute(&mut session, ConsoleCommand::Quit).await,
            Flow::Quit
        );
        assert_eq!(console.handle_line(&mut session, "").await, Flow::Continue);
        assert_eq!(
            console.handle_line(&mut session, "dance").await,
            Flow::Continue
        );
    }

    #[tokio::test]
    async fn connect_command_does_not_stall_dispatch() {
        // Accepts TCP but never answers the WebSocket handshake.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = SessionConfig {
            connection: ConnectionConfig {
                server_url: format!("ws://{addr}"),
                connect_timeout: Duration::from_secs(2),
                ..ConnectionConfig::default()
            },
            pacing_delay: Duration::from_millis(100),
            ..SessionConfig::default()
        };
        let (mut session, gameplay) = session_with(config, Duration::ZERO);

        let started = Instant::now();
        console().execute(&mut session, ConsoleCommand::Connect).await;
        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(session.status().state, ConnectionState::Connecting);

        session.enqueue_combo("a", 1);
        session.enqueue_combo("b", 2);
        assert_eq!(gameplay.combos(), 1);
        session.tick(Duration::from_millis(100));
        assert_eq!(gameplay.combos(), 2);
        assert_eq!(session.status().state, ConnectionState::Connecting);

        session.disconnect().await;
        assert!(!session.is_connected());
        drop(listener);
    }
}
