// -- crate imports
use anyhow::{Result, bail};
use clap::Parser;
use live_scout::{
    DataLocator, FixedRoot, Installation, InstallationData, InstallationLocator, NoPrompt,
    Outcome, Prompt, RootProvider, SkipPolicy, WalkOptions,
};
use serde::Serialize;
use tracing::{debug, info, warn};

// -- module definitions
mod args;
mod log;

// -- module imports
use crate::args::Args;

/// Everything found in one run, as printed with `--json`.
#[derive(Debug, Default, Serialize)]
struct Summary {
    installations: Vec<Installation>,
    data: Vec<InstallationData>,
    errors: Vec<String>,
}

impl Summary {
    fn absorb<T>(&mut self, outcome: Outcome<T>, what: &str, pick: fn(&mut Self) -> &mut Vec<T>) {
        pick(self).extend(outcome.items);
        if let Some(e) = outcome.error {
            warn!(error = %e, "{what} search incomplete");
            self.errors.push(format!("{what}: {e}"));
        }
    }
}

fn walk_options(args: &Args) -> WalkOptions {
    let policy = if args.warn_skipped {
        SkipPolicy::Warn
    } else {
        SkipPolicy::Debug
    };
    WalkOptions::default()
        .with_follow_links(args.follow_links)
        .with_skip_policy(policy)
}

fn find_installations(args: &Args, opts: WalkOptions) -> Outcome<Installation> {
    let locator = match InstallationLocator::for_host() {
        Ok(locator) => locator.with_options(opts),
        Err(e) => return Outcome::failed(e),
    };
    debug!(platform = ?locator.platform(), "Detected host platform");
    let locator = match &args.root {
        Some(root) => locator.with_default_root(root),
        None => locator,
    };

    let mut provider: Box<dyn RootProvider> = if args.no_prompt {
        Box::new(NoPrompt)
    } else if let Some(root) = &args.root {
        // An explicit root that is missing should not turn into a question.
        Box::new(FixedRoot(root.clone()))
    } else {
        Box::new(Prompt::stdin())
    };
    locator.find(provider.as_mut())
}

fn find_data(args: &Args, opts: WalkOptions) -> Outcome<InstallationData> {
    let locator = DataLocator::new().with_options(opts);
    match &args.config_dir {
        Some(dir) => locator.with_config_dir(dir).find(),
        None => locator.find(),
    }
}

fn print_human(summary: &Summary, args: &Args) {
    if args.wants_installations() {
        if summary.installations.is_empty() {
            println!("No Ableton Live installations found.");
        } else {
            println!("Ableton Live installations ({}):\n", summary.installations.len());
            for inst in &summary.installations {
                println!("- {}", inst.name);
                println!("  Path: {}", inst.path.display());
            }
        }
        println!();
    }

    if args.wants_data() {
        if summary.data.is_empty() {
            println!("No Ableton Live unlock data found.");
        } else {
            println!("Ableton Live unlock data ({}):\n", summary.data.len());
            for data in &summary.data {
                println!("- {}", data.name);
                println!("  Path: {}", data.path.display());
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.no_log {
        tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())
            .expect("Failed to set no-op subscriber");
    } else {
        log::init_tracing()?;
        info!("live-scout started");
        debug!("Parsed args: {args:#?}");
    }

    let opts = walk_options(&args);
    let mut summary = Summary::default();

    if args.wants_installations() {
        let outcome = find_installations(&args, opts);
        summary.absorb(outcome, "installations", |s| &mut s.installations);
    }
    if args.wants_data() {
        summary.absorb(find_data(&args, opts), "data", |s| &mut s.data);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_human(&summary, &args);
    }

    if !summary.errors.is_empty() {
        bail!("search incomplete: {}", summary.errors.join("; "));
    }

    info!("live-scout done!");
    Ok(())
}
