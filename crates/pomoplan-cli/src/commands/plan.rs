use clap::Args;
use pomoplan_core::planner::PlanClient;
use pomoplan_core::Config;

#[derive(Args)]
pub struct PlanArgs {
    /// Free-text description of the work to plan
    pub description: String,
    /// Print proposals as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    // Credential resolved once here, then injected; the client itself never
    // reads the environment.
    let api_key = config
        .planner
        .api_key
        .clone()
        .or_else(|| std::env::var("POMOPLAN_API_KEY").ok());

    let client = PlanClient::new(api_key).with_model(config.planner.model.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let extraction =
        runtime.block_on(client.extract_tasks(&args.description, chrono::Utc::now()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&extraction.tasks)?);
    } else if extraction.tasks.is_empty() {
        println!("no suggestions");
    } else {
        for task in &extraction.tasks {
            match &task.notes {
                Some(notes) => println!("{} ({} min) -- {notes}", task.title, task.duration),
                None => println!("{} ({} min)", task.title, task.duration),
            }
        }
    }

    Ok(())
}
