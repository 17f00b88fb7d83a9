use crate::{emit_success, OutputMode};
use bindgraph::config::{configured_manifest, default_manifest_path_in, write_config, BindgraphConfig};
use bindgraph::ui::{self, Icons};
use bindgraph::{
    BindingGraph, BindingRequest, BuildContext, ComponentPath, GraphBuilder, Key, Manifest,
    RequestKind,
};
use std::path::{Path, PathBuf};

/// `--manifest`, then the config file, then `./bindings.toml`
pub fn manifest_path(arg: Option<PathBuf>, config_path: &Path, config: &BindgraphConfig) -> PathBuf {
    arg.or_else(|| configured_manifest(config_path, config))
        .unwrap_or_else(|| default_manifest_path_in(Path::new(".")))
}

fn load_graph(path: &Path, verify_hierarchy: bool) -> anyhow::Result<BindingGraph> {
    let manifest = Manifest::load(path)?;
    let mut context = BuildContext::new();
    let graph = GraphBuilder::new(&mut context).build(&manifest)?;
    tracing::info!("Built {} components from {}", context.nodes_built(), path.display());

    if verify_hierarchy {
        graph.validate_hierarchy()?;
    }
    Ok(graph)
}

pub fn run_init(output_mode: OutputMode, path: &Path, manifest: String, force: bool) -> anyhow::Result<()> {
    let config = BindgraphConfig {
        manifest: Some(manifest),
        verify_hierarchy: Some(true),
    };
    write_config(path, &config, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
    } else {
        emit_success("init", serde_json::json!({ "config": path, "settings": config }))?;
    }
    Ok(())
}

pub fn run_inspect(
    output_mode: OutputMode,
    manifest: &Path,
    config: &BindgraphConfig,
    show_bindings: bool,
) -> anyhow::Result<()> {
    let graph = load_graph(manifest, config.verify_hierarchy())?;

    if !output_mode.is_human() {
        let components: Vec<serde_json::Value> = graph
            .walk()
            .map(|(path, node)| {
                let mut contributions: Vec<&Key> = node.contribution_bindings().keys().collect();
                let mut members: Vec<&Key> = node.members_injection_bindings().keys().collect();
                contributions.sort();
                members.sort();
                serde_json::json!({
                    "path": path,
                    "descriptor": node.component_descriptor(),
                    "contributions": contributions,
                    "members_injection": members,
                })
            })
            .collect();
        return emit_success("inspect", serde_json::json!({ "components": components }));
    }

    ui::header(&format!("Component tree ({})", manifest.display()));
    for (path, node) in graph.walk() {
        let depth = path.depth();
        ui::component_line(
            depth,
            node.component_descriptor(),
            node.contribution_bindings().len(),
            node.members_injection_bindings().len(),
        );
        if !show_bindings {
            continue;
        }

        let mut contributions: Vec<_> = node.contribution_bindings().values().collect();
        contributions.sort_by(|a, b| a.key().cmp(b.key()));
        for resolved in contributions {
            ui::binding_line(depth, false, resolved);
        }

        let mut members: Vec<_> = node.members_injection_bindings().values().collect();
        members.sort_by(|a, b| a.key().cmp(b.key()));
        for resolved in members {
            ui::binding_line(depth, true, resolved);
        }
    }
    Ok(())
}

pub fn run_lookup(
    output_mode: OutputMode,
    manifest: &Path,
    config: &BindgraphConfig,
    key: &str,
    kind: &str,
    component: Option<&str>,
) -> anyhow::Result<()> {
    let graph = load_graph(manifest, config.verify_hierarchy())?;
    let request = BindingRequest::new(Key::parse(key)?, kind.parse::<RequestKind>()?);

    let path = match component {
        Some(text) => ComponentPath::parse(text)?,
        None => ComponentPath::root(graph.component_descriptor().declaration().clone()),
    };
    let node = graph
        .find(&path)
        .ok_or_else(|| bindgraph::Error::ComponentNotFound(path.to_string()))?;
    let resolved = node.resolved_bindings(&request);

    if !output_mode.is_human() {
        return emit_success(
            "lookup",
            serde_json::json!({
                "component": path,
                "request": request,
                "table": request.table(),
                "resolved": resolved,
            }),
        );
    }

    ui::header(&format!("{} in {}", request, path));
    ui::info("Table", &request.table().to_string());
    match resolved {
        Some(resolved) => ui::binding_line(0, request.is_members_injection(), resolved),
        None => ui::absent(&format!(
            "{} is not bound in the {} table of {}",
            request.key(),
            request.table(),
            path.current()
        )),
    }
    Ok(())
}

pub fn run_stats(output_mode: OutputMode, manifest: &Path, config: &BindgraphConfig) -> anyhow::Result<()> {
    let graph = load_graph(manifest, config.verify_hierarchy())?;
    let stats = graph.stats();

    if output_mode.is_human() {
        ui::section(&format!("{} Binding graph ({})", Icons::STATS, manifest.display()));
        println!("{}", ui::stats_table(&stats));
    } else {
        emit_success("stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}

pub fn run_validate(output_mode: OutputMode, manifest: &Path) -> anyhow::Result<()> {
    let graph = match load_graph(manifest, true) {
        Ok(graph) => graph,
        Err(err) => {
            if output_mode.is_human() {
                ui::error(&format!("{} is invalid", manifest.display()));
                ui::summary_row("Reason:", &err.to_string());
            }
            return Err(err);
        }
    };

    let stats = graph.stats();
    if output_mode.is_human() {
        ui::success(&format!("{} is valid", manifest.display()));
        ui::summary_row("Components:", &stats.components.to_string());
        if stats.unsatisfied_keys > 0 {
            ui::warn(&format!("{} keys have no bindings", stats.unsatisfied_keys));
        }
    } else {
        emit_success("validate", serde_json::json!({ "valid": true, "stats": stats }))?;
    }
    Ok(())
}
