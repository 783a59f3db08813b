use mealmatch::client::MealDbClient;
use mealmatch::config::AppConfig;
use mealmatch::interactive::Session;
use mealmatch::pipeline::RecipeFinder;
use std::io;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let client =
        MealDbClient::with_base_url(&config.api_base_url, Duration::from_secs(config.timeout))?;
    let finder = RecipeFinder::new(client, &config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(finder, stdin.lock(), stdout.lock());
    session.run()?;

    Ok(())
}
