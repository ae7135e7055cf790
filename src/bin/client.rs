use anyhow::Context;
use appointment_board::client::command::{Command, HELP};
use appointment_board::client::{ApiClient, AppointmentApi, Controller};
use appointment_board::config::ClientConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("Failed to load client configuration")?;
    let api = ApiClient::new(&config.backend_uri)?;
    info!("Using backend {}", api.appointments_url());

    let mut controller = Controller::new(api);
    controller.mount().await;
    draw(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => apply(&mut controller, command).await,
            Err(message) => println!("{}", message),
        }
        draw(&controller);
    }

    Ok(())
}

async fn apply<A: AppointmentApi>(controller: &mut Controller<A>, command: Command) {
    match command {
        Command::Refresh => controller.mount().await,
        Command::Add => controller.open_dialog(),
        Command::Set(field, value) => {
            if !controller.set_field(field, value) {
                println!("open the dialog with `add` first");
            }
        }
        Command::Confirm => controller.add().await,
        Command::Cancel => controller.cancel_dialog(),
        Command::Delete(index) => controller.delete_at(index).await,
        Command::Move(from, to) => drag(controller, from, vec![to]),
        Command::Drag(start, hovers) => drag(controller, start, hovers),
        Command::Toggle => controller.toggle_summary(),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn drag<A: AppointmentApi>(controller: &mut Controller<A>, start: usize, hovers: Vec<usize>) {
    match controller.begin_drag(start) {
        Some(mut session) => {
            for target in hovers {
                controller.drag_hover(&mut session, target);
            }
        }
        None => println!("rows can only be dragged on the board"),
    }
}

fn draw<A: AppointmentApi>(controller: &Controller<A>) {
    println!();
    for line in controller.render() {
        println!("{}", line);
    }
}
