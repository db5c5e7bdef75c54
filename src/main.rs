// SPDX-License-Identifier: GPL-3.0-only

//! Interactive on-screen keyboard demo.
//!
//! Builds a sample settings page, attaches the keyboard after the configured
//! delay and drives it from stdin. Usage:
//!
//! ```text
//! onscreen-keyboard [config.json]
//! ```

use onscreen_keyboard::app_settings;
use onscreen_keyboard::config::Config;
use onscreen_keyboard::input::InputElement;
use onscreen_keyboard::keyboard::{self, KeyboardController};
use onscreen_keyboard::layout::KeyKind;
use onscreen_keyboard::page::{settings_page, Page};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::{Directive, EnvFilter};

const HELP: &str = "\
commands:
  fields            list the page fields and their values
  click <field>     click a field
  press <key>       press a key (7, q, backspace, caps, enter, space, done)
  type <text>       press one key per character
  show              draw the keyboard panel
  quit              exit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref())?;

    // Initialize logging
    let directive: Directive = config
        .log_filter
        .parse()
        .or_else(|_| app_settings::DEFAULT_LOG_FILTER.parse())?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    let page = settings_page();
    tracing::info!(
        "{} waiting {} ms for the page to settle",
        app_settings::APP_NAME,
        config.init_delay_ms
    );
    let mut keyboard = keyboard::attach(&config).await?;
    keyboard.on_close(|value| println!("committed: {:?}", value));

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "fields" => print_fields(&page),
            "show" => print_panel(&keyboard),
            "click" => {
                if !page.click(argument, &mut keyboard) {
                    println!("no field named {:?}", argument);
                }
            }
            "press" => match KeyKind::from_token(argument) {
                Some(kind) => keyboard.press(kind),
                None => println!("unknown key {:?}", argument),
            },
            "type" => {
                for c in argument.chars() {
                    let kind = if c == ' ' {
                        Some(KeyKind::Space)
                    } else {
                        KeyKind::from_token(&c.to_string())
                    };
                    if let Some(kind) = kind {
                        keyboard.press(kind);
                    }
                }
            }
            other => println!("unknown command {:?}, try help", other),
        }

        keyboard.process_pending();
        if keyboard.panel().is_visible() {
            print_panel(&keyboard);
        }
    }

    Ok(())
}

fn print_fields(page: &Page) {
    for field in page.fields() {
        println!(
            "  {:<12} type={:<9} value={:?}",
            field.name(),
            field.input_type(),
            field.value()
        );
    }
}

fn print_panel(keyboard: &KeyboardController) {
    if !keyboard.panel().is_visible() {
        println!("(keyboard hidden)");
        return;
    }
    println!("{}", keyboard.panel());
    if let Some(buffer) = keyboard.buffer() {
        println!("> {:?}", buffer);
    }
}
