//! Interactive console for the gateway.
//!
//! Presentation glue over the library crates: a transport menu, the
//! prompt loops, and reply rendering. Run with `cargo run -p
//! gateway-console`; configure via `GATEWAY_URL` and `GATEWAY_KEY`.

mod render;

use std::io::Write as _;

use anyhow::Result;
use gateway_console_auth::{ClientConfig, CredentialResolver};
use gateway_console_core::{
    Credentials, GatewayAddress, PromptDriver, Session,
};
use gateway_console_transport::{ExecDriver, RpcDriver, health, websocket};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let address = GatewayAddress::new(&config.gateway_url);

    // Credentials resolve before any interactive loop, so the secret
    // tool never stalls a live connection.
    let credentials = CredentialResolver::new().resolve().await;
    let mut session = Session::new();
    tracing::debug!(session = %session.id(), "client session created");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        show_menu(&address);
        let Some(choice) = lines.next_line().await? else {
            break;
        };
        match choice.trim() {
            "1" => {
                let driver = RpcDriver::new(&address, credentials.clone());
                prompt_loop(&driver, &mut session, &mut lines).await?;
            }
            "2" => {
                let driver = ExecDriver::new(&address, credentials.clone());
                prompt_loop(&driver, &mut session, &mut lines).await?;
            }
            "3" => websocket_mode(&address, &credentials, &mut lines).await?,
            "4" => health_mode(&address).await,
            "5" | "q" | "quit" | "exit" => break,
            "" => {}
            other => println!("unknown option: {other}"),
        }
    }

    println!("bye");
    Ok(())
}

fn show_menu(address: &GatewayAddress) {
    println!();
    println!("gateway console - {}", address.http_base());
    println!("  1. json-rpc mode");
    println!("  2. exec mode");
    println!("  3. websocket mode");
    println!("  4. health check");
    println!("  5. quit");
    print_prompt();
}

/// Request/response loop shared by the json-rpc and exec transports.
async fn prompt_loop(
    driver: &dyn PromptDriver,
    session: &mut Session,
    lines: &mut InputLines,
) -> Result<()> {
    println!();
    println!("{} mode, session {}", driver.name(), session.id());
    println!("type a prompt; 'clear' clears the screen, 'exit' leaves the mode");

    loop {
        print_prompt();
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        let Some(line) = line else {
            break; // stdin closed
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" {
            break;
        }
        if input == "clear" {
            clear_screen();
            continue;
        }

        println!("waiting for the gateway...");
        let reply = driver.call(session, input).await;
        render::reply(&reply);
        println!();
    }

    Ok(())
}

/// Duplex loop over one WebSocket connection.
///
/// Inbound frames and operator lines are multiplexed in a single select;
/// the session winding down on either side ends the mode.
async fn websocket_mode(
    address: &GatewayAddress,
    credentials: &Credentials,
    lines: &mut InputLines,
) -> Result<()> {
    println!();
    println!("connecting to {} ...", address.ws_base());
    let mut ws = match websocket::connect(address, credentials).await {
        Ok(ws) => ws,
        Err(e) => {
            println!("connection failed: {e}");
            return Ok(());
        }
    };
    println!("connected; type lines to send, 'exit' leaves the mode");

    loop {
        print_prompt();
        tokio::select! {
            frame = ws.recv() => match frame {
                Some(frame) => render::ws_frame(&frame),
                None => {
                    println!("connection closed by the gateway");
                    break;
                }
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    ws.close();
                    break;
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "exit" {
                    ws.close();
                    break;
                }
                if let Err(e) = ws.send(input).await {
                    println!("send failed: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                ws.close();
                break;
            }
        }
    }

    Ok(())
}

async fn health_mode(address: &GatewayAddress) {
    println!();
    println!("checking {} ...", address.http_base());
    match health::check(address).await {
        Ok(true) => println!("gateway is healthy"),
        Ok(false) => println!("gateway is up but not healthy"),
        Err(e) => println!("health check failed: {e}"),
    }
}

fn print_prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
    let _ = std::io::stdout().flush();
}
