use crate::binding::ResolvedBindings;
use crate::component::ComponentDescriptor;
use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::SEARCH, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// One line of a component tree, indented by depth
pub fn component_line(depth: usize, descriptor: &ComponentDescriptor, contributions: usize, members: usize) {
    if is_quiet() {
        return;
    }
    let icon = if depth == 0 { Icons::ROOT } else { Icons::COMPONENT };
    println!(
        "{}{} {} {} {}",
        "  ".repeat(depth),
        icon,
        descriptor.declaration().as_str().style(theme().component.clone()),
        dim(&format!("[{}]", descriptor.kind())),
        dim(&format!("{} contributions, {} members-injection", contributions, members)),
    );
}

/// A resolved key and each of its bindings
pub fn binding_line(depth: usize, members_injection: bool, resolved: &ResolvedBindings) {
    if is_quiet() {
        return;
    }
    let indent = "  ".repeat(depth + 1);
    let icon = if members_injection { Icons::MEMBERS } else { Icons::KEY };
    println!(
        "{}{} {}",
        indent,
        icon,
        resolved.key().to_string().style(theme().key.clone())
    );
    if resolved.is_empty() {
        println!("{}  {} {}", indent, Icons::EMPTY, dim("no bindings"));
    }
    for binding in resolved.bindings() {
        println!("{}  {} {}", indent, Icons::BINDING, binding.short_description());
    }
}

/// Report a lookup miss
pub fn absent(what: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::EMPTY, what.style(theme().dim.clone()));
}
