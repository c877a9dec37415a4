use alert_store::config::cli::{read_input_file, Command};
use alert_store::utils::{logger, validation::Validate};
use alert_store::{
    open_bucket, AlertConfigDesc, AlertStore, AlertStoreError, BucketAlertStore, CliConfig,
};
use clap::Parser;

fn exit_with(e: &AlertStoreError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.store_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let bucket = match open_bucket(&config.storage).await {
        Ok(bucket) => bucket,
        Err(e) => {
            tracing::error!("Failed to open configured bucket: {}", e);
            exit_with(&e);
        }
    };
    let store = BucketAlertStore::new(bucket);

    if let Err(e) = run(&store, &cli.command).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

async fn run(store: &impl AlertStore, command: &Command) -> alert_store::Result<()> {
    match command {
        Command::List => {
            let cfgs = store.list_alert_configs().await?;
            let mut tenants: Vec<_> = cfgs.keys().cloned().collect();
            tenants.sort();
            let ordered: Vec<&AlertConfigDesc> = tenants.iter().map(|t| &cfgs[t]).collect();
            println!("{}", serde_json::to_string_pretty(&ordered)?);
        }
        Command::Users => {
            for tenant in store.list_all_users().await? {
                println!("{}", tenant);
            }
        }
        Command::Get { tenant } => {
            let cfg = store.get_alert_config(tenant).await?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        Command::Set {
            tenant,
            config_file,
            templates,
        } => {
            let mut cfg = AlertConfigDesc::new(tenant.clone(), read_input_file(config_file)?);
            for path in templates {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                cfg = cfg.with_template(filename, read_input_file(path)?);
            }

            store.set_alert_config(&cfg).await?;
            println!("✅ Stored alertmanager config for tenant '{}'", tenant);
        }
        Command::Delete { tenant } => {
            store.delete_alert_config(tenant).await?;
            println!("🗑️  Deleted alertmanager config for tenant '{}'", tenant);
        }
    }

    Ok(())
}
