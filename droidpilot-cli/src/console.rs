use droidpilot_core::agent::SessionObserver;

/// Prints session events as they arrive. Progress goes to stderr so stdout
/// only carries results.
pub struct ConsoleObserver {
    verbose: bool,
}

impl ConsoleObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl SessionObserver for ConsoleObserver {
    fn on_status(&mut self, text: &str) {
        if self.verbose {
            eprintln!("> {text}");
        }
    }

    fn on_tool_result(&mut self, text: &str) {
        if self.verbose {
            println!("  {text}");
        }
    }

    fn on_error(&mut self, text: &str) {
        eprintln!("Failed: {text}");
    }

    fn on_completed(&mut self, message: &str) {
        if self.verbose {
            println!("Done: {message}");
        }
    }
}
