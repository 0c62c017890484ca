#[cfg(target_arch = "wasm32")]
use log::Level;
use log::{LevelFilter, Log, Metadata, Record};

/// Sends `log` records to the browser console, or to stderr off the web.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

fn format_record(record: &Record<'_>) -> String {
    format!("[robot-blackjack] {} {}", record.level(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);

        #[cfg(target_arch = "wasm32")]
        {
            let line = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{line}");
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn formats_level_and_message() {
        assert_eq!(
            format_record(
                &Record::builder()
                    .args(format_args!("dealer at {}", 17))
                    .level(Level::Info)
                    .build()
            ),
            "[robot-blackjack] INFO dealer at 17"
        );
    }
}
