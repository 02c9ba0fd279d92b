use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

/// Confirmation prompts and user-facing notices raised by table actions.
pub trait Notifier: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Prompts on the terminal. `assume_yes` answers every confirmation with yes.
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier {
    pub assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            info!(prompt = %message, "Confirmation assumed");
            return true;
        }

        print!("{message} [y/N] ");
        if let Err(e) = io::stdout().flush() {
            warn!("Failed to flush prompt: {}", e);
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}
