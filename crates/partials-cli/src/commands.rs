use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, info_span};

use partials_cli::document::{Document, JsonData, lazy_tree};
use partials_http::RequestDirectives;
use partials_transform::{
    AllowedDirectives, DirectiveKind, Partial, PartialsConfig, Selector, SelectorTree,
    TransformOptions, TypeConfig, split_list,
};

use crate::cli::{SelectorArgs, TransformArgs};

pub fn run_transform(args: &TransformArgs) -> Result<()> {
    let input = args.input.as_deref().filter(|path| *path != Path::new("-"));
    let label = input.map_or_else(|| "<stdin>".to_string(), |path| path.display().to_string());
    let span = info_span!("transform", input = %label);
    let _guard = span.enter();

    let text = read_input(input)?;
    let value: Value = serde_json::from_str(&text).with_context(|| format!("parse {label}"))?;
    let lazy = lazy_tree(&args.lazy).context("parse --lazy selectors")?;
    let document = Document::from_value(value, &lazy)?;
    let config = query_config(args.allow_config.as_deref())?;

    let mut options = TransformOptions::for_json();
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }

    let output = match &document {
        Document::Object(data) => transform(Partial::new(data), args, &config, options)?,
        Document::Collection(collection) => {
            info!(items = collection.len(), "transforming collection");
            transform(Partial::collection(collection), args, &config, options)?
        }
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

pub fn run_selector(args: &SelectorArgs) -> Result<()> {
    let selectors = args
        .selectors
        .iter()
        .flat_map(|entry| split_list(entry))
        .map(Selector::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if args.tree {
        let tree: SelectorTree = selectors.iter().collect();
        for selector in tree.to_selectors() {
            println!("{selector}");
        }
    } else {
        for selector in &selectors {
            println!("{selector}\t(depth {})", selector.depth());
        }
    }
    Ok(())
}

fn transform<T: ?Sized>(
    partial: Partial<'_, T>,
    args: &TransformArgs,
    config: &PartialsConfig,
    options: TransformOptions,
) -> Result<Value> {
    let mut partial = partial.with_config(config).with_options(options);

    let flags = [
        (DirectiveKind::Include, &args.include),
        (DirectiveKind::Exclude, &args.exclude),
        (DirectiveKind::Only, &args.only),
        (DirectiveKind::Except, &args.except),
    ];
    for (kind, entries) in flags {
        let selectors = entries.iter().flat_map(|entry| split_list(entry));
        partial
            .directives_mut()
            .add(kind, selectors)
            .with_context(|| format!("parse --{kind} selectors"))?;
    }

    if let Some(query) = &args.query {
        RequestDirectives::from_query(query)?.apply_to(&mut partial)?;
    }

    Ok(partial.to_json()?)
}

/// Allowlists for `--query` directives: the TOML file when given, otherwise
/// unrestricted.
fn query_config(path: Option<&Path>) -> Result<PartialsConfig> {
    let allowed = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            toml::from_str::<AllowedDirectives>(&text)
                .with_context(|| format!("parse {}", path.display()))?
        }
        None => AllowedDirectives::unrestricted(),
    };
    debug!(?allowed, "query allowlists");
    Ok(PartialsConfig::new().register::<JsonData>(TypeConfig::new().with_allowed(allowed)))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}
