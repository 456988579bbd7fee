use strsim::levenshtein;
use tracing::debug;

use crate::cli::{
    commands,
    core::{CliError, CliMode, CommandError, LoopControl},
    formatters::MoneyFormatter,
    output,
    registry::CommandRegistry,
};
use crate::config::{Config, ConfigManager};
use crate::core::services::LedgerService;
use crate::domain::TimeWindow;
use crate::errors::LedgerError;
use crate::storage::JsonStorage;

/// Session state shared by every command handler.
pub struct ShellContext {
    pub(crate) running: bool,
    pub(crate) last_command: Option<String>,
    pub(crate) ledger: LedgerService,
    pub(crate) window: TimeWindow,
    pub(crate) money: MoneyFormatter,
    registry: CommandRegistry,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(
            Some(config_manager.base_dir().to_path_buf()),
            Some(&config.slot_name),
        )?;
        debug!(slot = %storage.slot_path().display(), "opening ledger");
        let ledger = LedgerService::open(Box::new(storage))?;
        Ok(Self::with_ledger(mode, ledger, config))
    }

    pub fn with_ledger(mode: CliMode, ledger: LedgerService, config: Config) -> Self {
        if mode == CliMode::Script {
            output::set_plain(true);
        }
        Self {
            running: true,
            last_command: None,
            window: config.default_window,
            money: MoneyFormatter::new(config.currency_symbol),
            ledger,
            registry: commands::registry(),
        }
    }

    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn prompt(&self) -> String {
        format!("ledger [{}]> ", self.window)
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        debug!(command = ?self.last_command, %err, "command failed");
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(message)) => output::warning(message),
            other => output::error(other),
        }
    }
}
