//! Command handlers: train once, then forecast or print the tree.

use std::fs;
use std::path::Path;

use coffea_core::{CoffeaError, Result, Summarizable};
use coffea_ml::dataset::{Feature, Observation, PriceLevel};
use coffea_ml::evaluate::{accuracy, misclassified};
use coffea_ml::history::coffee_history;
use coffea_ml::tree::{DecisionTree, TreeConfig};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Cli, Command, PredictArgs};

type PriceTree = DecisionTree<Feature, PriceLevel>;

/// JSON output of `predict`.
#[derive(Debug, Serialize)]
struct Forecast {
    rainfall: f64,
    temperature: f64,
    supply: f64,
    demand: f64,
    prediction: PriceLevel,
    message: &'static str,
}

pub fn run_command(cli: &Cli) -> Result<()> {
    let history = match &cli.history {
        Some(path) => load_history(path)?,
        None => coffee_history(),
    };
    let tree = train(&history, cli.max_depth)?;

    match &cli.command {
        Command::Predict(args) => predict(&tree, args, cli.json),
        Command::Tree => print_tree(&tree, cli.json),
    }
}

/// Read a JSON array of observations.
pub fn load_history(path: &Path) -> Result<Vec<Observation>> {
    let text = fs::read_to_string(path)?;
    let history: Vec<Observation> = serde_json::from_str(&text)
        .map_err(|e| CoffeaError::Parse(format!("{}: {e}", path.display())))?;
    info!(records = history.len(), path = %path.display(), "history loaded");
    Ok(history)
}

fn train(history: &[Observation], max_depth: usize) -> Result<PriceTree> {
    let tree = DecisionTree::fit(history, &Feature::ALL, &TreeConfig { max_depth })?;
    info!(
        records = history.len(),
        accuracy = accuracy(&tree, history)?,
        "{}",
        tree.summary()
    );
    for (obs, predicted) in misclassified(&tree, history)? {
        debug!(
            year = obs.year,
            actual = %obs.price,
            %predicted,
            "training record misclassified"
        );
    }
    Ok(tree)
}

fn predict(tree: &PriceTree, args: &PredictArgs, json: bool) -> Result<()> {
    debug!(
        rainfall = args.rainfall,
        temperature = args.temperature,
        supply = args.supply,
        demand = args.demand,
        "season received"
    );

    let forecast = forecast(tree, args)?;
    println!("{}", render(&forecast, json)?);
    Ok(())
}

fn forecast(tree: &PriceTree, args: &PredictArgs) -> Result<Forecast> {
    let prediction = *tree.predict(&args.to_vector())?;
    info!(%prediction, "forecast ready");

    Ok(Forecast {
        rainfall: args.rainfall,
        temperature: args.temperature,
        supply: args.supply,
        demand: args.demand,
        prediction,
        message: prediction.describe(),
    })
}

fn render(forecast: &Forecast, json: bool) -> Result<String> {
    if json {
        to_json(forecast)
    } else {
        Ok(format!(
            "Forecast: {} ({})",
            forecast.message, forecast.prediction
        ))
    }
}

fn print_tree(tree: &PriceTree, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(tree.root())?);
    } else {
        println!("{}", tree.summary());
        println!("{}", to_json(tree.root())?);
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| CoffeaError::Other(e.to_string()))
}
