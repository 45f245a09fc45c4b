//! Terminal driver for the task list
//!
//! Reads one command per line from stdin, applies it to the task store and
//! prints the resulting list. Fired reminders are printed as they arrive.

mod command;
mod config;
mod handler;

use std::sync::Arc;

use tasklist_core::reminder::{
    DeliveredReminder, DisabledReminderScheduler, ReminderScheduler, TokioReminderScheduler,
};
use tasklist_core::storage::FileKeyValueStore;
use tasklist_core::TaskStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Command, HELP};
use crate::config::AppConfig;
use crate::handler::Response;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the list
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=info,tasklist_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Using data directory: {:?}", config.data_dir);

    let storage = Arc::new(FileKeyValueStore::new(&config.data_dir));
    let (scheduler, mut delivered_rx) = if config.reminders_enabled {
        let (scheduler, rx) = TokioReminderScheduler::new();
        (Arc::new(scheduler) as Arc<dyn ReminderScheduler>, Some(rx))
    } else {
        tracing::info!("Reminders disabled");
        (Arc::new(DisabledReminderScheduler) as Arc<dyn ReminderScheduler>, None)
    };

    let opened = TaskStore::open(storage, scheduler).await;
    for warning in &opened.warnings {
        println!("warning: {}", warning);
    }
    let mut store = opened.value;

    println!("{}", HELP);
    print(&Response {
        lines: handler::render(&store),
        quit: false,
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let response = match Command::parse(&line) {
                    Ok(Some(command)) => handler::dispatch(&mut store, command).await,
                    Ok(None) => continue,
                    Err(e) => Response {
                        lines: vec![e.to_string()],
                        quit: false,
                    },
                };
                print(&response);
                if response.quit {
                    break;
                }
            }
            Some(delivered) = next_delivery(&mut delivered_rx) => {
                let response = handler::deliver(&mut store, delivered).await;
                print(&response);
            }
        }
    }

    tracing::info!("Exiting with {} tasks", store.tasks().len());
    Ok(())
}

async fn next_delivery(
    rx: &mut Option<UnboundedReceiver<DeliveredReminder>>,
) -> Option<DeliveredReminder> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn print(response: &Response) {
    for line in &response.lines {
        println!("{}", line);
    }
}
