use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use feature_logic::binary::{left, right};
use feature_logic::literal::{count_negative_literals, count_positive_literals, is_complex_constraint, max_depth};
use feature_logic::model::{insert_group, Feature, FeatureMap, GroupKind};
use feature_logic::parser::parse_constraint;
use feature_logic::relation::classify;
use feature_logic::root::derive_root;
use feature_logic::translate::{TranslateConfig, Translator};
use feature_logic::utils::split_trimmed;

#[derive(Parser)]
#[command(author, version, about = "Feature model constraint analyzer")]
struct Cli {
    /// Maximum nesting depth accepted during translation
    #[arg(long, value_name = "INT")]
    max_depth: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize requires/excludes relations
    Classify {
        /// Constraints, e.g. "!A | B"
        constraints: Vec<String>,
    },

    /// Translate constraints to engine formulas and back
    Translate {
        /// Constraints, e.g. "A => (B & !C)"
        constraints: Vec<String>,
    },

    /// Derive a single root for a set of top-level features
    Root {
        /// Top-level features as a comma-separated list, with optional
        /// children after a colon: "A:A1 A2, B, C"
        #[arg(long)]
        features: String,

        /// Name of the synthesized root
        #[arg(long, default_value = "Root")]
        name: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = TranslateConfig::default();
    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth);
    }
    let translator = Translator::new(config);

    match cli.command {
        Commands::Classify { constraints } => {
            for text in &constraints {
                let constraint = parse_constraint(text)?;
                let relation = classify(&constraint);
                match relation.features() {
                    Some((source, target)) => println!("{}: {} ({}, {})", constraint, relation.kind, source, target),
                    None => println!(
                        "{}: {} (depth {}, {} positive, {} negative literals{})",
                        constraint,
                        relation.kind,
                        max_depth(&constraint),
                        count_positive_literals(&constraint),
                        count_negative_literals(&constraint),
                        if is_complex_constraint(&constraint) { ", complex" } else { "" },
                    ),
                }
            }
        }

        Commands::Translate { constraints } => {
            for text in &constraints {
                let constraint = parse_constraint(text)?;
                let formula = translator
                    .to_formula(&constraint)
                    .map_err(|e| eyre!("cannot translate '{}': {}", constraint, e))?;
                let back = translator.from_formula(&formula)?;
                println!("constraint: {}", constraint);
                println!("  formula:  {} ({} nodes)", formula, formula.size());
                println!("  restored: {}", back);
                if let (Some(lhs), Some(rhs)) = (left(&back), right(&back)) {
                    println!("  operands: {} / {}", lhs, rhs);
                }
            }
        }

        Commands::Root { features, name } => {
            let mut map = FeatureMap::new();
            for entry in split_trimmed(&features, ",") {
                let (top, children) = match entry.split_once(':') {
                    Some((top, children)) => (top.trim(), split_trimmed(children, " ")),
                    None => (entry, Vec::new()),
                };
                map.insert(top.to_string(), Feature::new(top));
                if !children.is_empty() {
                    insert_group(&mut map, top, GroupKind::Optional, children.as_slice());
                }
            }
            log::info!("Loaded {} features", map.len());

            let (map, root) = derive_root(map, &name)?;
            println!("root = {}", root);
            for feature in map.values() {
                let parent = feature.parent.as_ref().map_or("-", |link| link.feature.as_str());
                println!("  {} (parent: {})", feature.name, parent);
            }
        }
    }

    Ok(())
}
