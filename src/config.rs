use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// Rent and return cars from a small fleet through a text menu.
pub struct Options {
    #[argh(switch)]
    /// read input line by line without the interactive line editor.
    /// Implied when stdin is not a terminal.
    pub plain: bool,

    #[argh(switch)]
    /// register a renter only once a rental is confirmed, instead of on every attempt.
    pub register_on_confirm: bool,

    #[argh(option, default = "String::from(\"warn\")")]
    /// diagnostic log filter written to stderr, e.g. "info" or "car_rental=debug".
    /// RUST_LOG takes precedence when set.
    pub log: String,
}

/// When a renter record is created during the rent flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenterRegistration {
    /// Every rent attempt registers its renter, even if the rental is canceled
    /// or the selected vehicle turns out to be unavailable.
    #[default]
    EveryAttempt,
    /// Only confirmed, successful rentals register a renter.
    OnConfirmedRental,
}

/// Where operator input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Editor,
    Plain,
}

/// Runtime settings consumed by the interaction loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub renter_registration: RenterRegistration,
    pub input_mode: InputMode,
}

impl Settings {
    /// Build settings from parsed options; `stdin_is_terminal` picks plain input
    /// when the console is piped.
    pub fn from_options(options: &Options, stdin_is_terminal: bool) -> Self {
        let renter_registration = if options.register_on_confirm {
            RenterRegistration::OnConfirmedRental
        } else {
            RenterRegistration::EveryAttempt
        };
        let input_mode = if options.plain || !stdin_is_terminal {
            InputMode::Plain
        } else {
            InputMode::Editor
        };
        Self {
            renter_registration,
            input_mode,
        }
    }
}
