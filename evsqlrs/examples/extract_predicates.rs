use std::{env, fs};

use evsql::config::EvsqlConfig;

fn usage() {
    eprintln!("Usage: extract_predicates <sql_file> [config_toml]");
    eprintln!("Example: cargo run --example extract_predicates -- query.sql evsql.toml");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        usage();
        std::process::exit(1);
    }

    let sql = fs::read_to_string(args.remove(0))?;
    let config = if args.is_empty() {
        EvsqlConfig::default()
    } else {
        EvsqlConfig::from_file(args.remove(0))?
    };

    let predicates = evsql::extract_predicates(&sql, &config)?;
    for predicate in &predicates {
        println!(
            "{} {} {} [{}]",
            predicate.left_expression,
            predicate.relation,
            predicate.right_expression,
            predicate.logical_operator
        );
    }
    Ok(())
}
