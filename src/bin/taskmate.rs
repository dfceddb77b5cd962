use taskmate::client::Client;
use taskmate::config::Settings;
use taskmate::storage::Storage;
use taskmate::Controller;

const USAGE: &str = "Usage: taskmate [chat <message>]";


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let chat_message = match args.first().map(|a| a.as_str()) {
        None => None,
        Some("chat") if args.len() > 1 => Some(args[1..].join(" ")),
        Some(_) => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        },
    };

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        },
    };

    let client = match Client::new(settings.base_url.as_str()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Unable to create a client: {}", err);
            std::process::exit(1);
        },
    };
    let storage = match Storage::from_folder(&settings.storage_folder) {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("{}. Starting with an empty storage", err);
            Storage::new(&settings.storage_folder)
        }
    };

    let mut controller = Controller::new(client, storage, settings);
    if controller.initialize().await == false {
        println!("Please log in at {}", controller.navigation().unwrap_or_default());
        std::process::exit(1);
    }

    taskmate::utils::print_task_list(controller.tasks());
    println!();
    taskmate::utils::print_suggestion_feed(controller.suggestions());

    if let Some(message) = chat_message {
        println!();
        controller.send_message(&message).await;
        taskmate::utils::print_chat(controller.chat());
    }
}
