use fieldnotes_config::Config;

/// Strategy for displaying the effective configuration.
///
/// Missing config files are not an error here; the defaults are shown.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== fieldnotes Configuration ===\n");

        println!("Config File:");
        if config_path.exists() {
            println!("  Path: {}", config_path.display());
        } else {
            println!("  Path: {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Query:");
        println!("  Trigger: {:?}", config.query.trigger);
        println!("  Max Results: {}", config.query.max_results);
        println!(
            "  Out-of-range Rank: {}",
            if config.query.ignore_out_of_range {
                "ignored"
            } else {
                "abandons query"
            }
        );
        println!("  Retain Trigger: {}", config.query.retain_trigger);
        println!();

        println!("Links:");
        println!("  Label: {}", config.links.label);
        println!("  URL Template: {}", config.links.url_template);
        println!();

        println!("Case Files:");
        println!("  Root: {}", config.case_files.resolve_root()?.display());

        Ok(())
    }
}
