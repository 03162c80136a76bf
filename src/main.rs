use car_rental::config::{InputMode, Options, Settings};
use car_rental::io_adapters::{EditorInput, LineSource, ReaderInput};
use car_rental::{FleetRegistry, InteractionLoop};
use std::io::IsTerminal;

fn main() -> anyhow::Result<()> {
    let options: Options = argh::from_env();
    car_rental::logging::init(&options.log)?;

    let settings = Settings::from_options(&options, std::io::stdin().is_terminal());
    tracing::debug!(?settings, "starting car rental console");

    let mut input: Box<dyn LineSource> = match settings.input_mode {
        InputMode::Editor => Box::new(EditorInput::new()?),
        InputMode::Plain => Box::new(ReaderInput::new(std::io::stdin().lock())),
    };

    let mut session = InteractionLoop::new(FleetRegistry::with_demo_fleet(), settings);
    session.run(input.as_mut(), &mut std::io::stdout().lock())
}
