//! Naming strategies, tried in precedence order.
//!
//! Each strategy returns `None` when it does not apply to the container.

use std::sync::LazyLock;

use regex::Regex;

use crate::container::Container;

use super::sanitize::compile;

/// A `/periodic-<launch-time>` suffix added by the scheduler to periodic job allocations.
pub(super) const PERIODIC_SUFFIX_PATTERN: &str = r"/periodic-[0-9]+";
/// A `-` followed by a UUID in 8-4-4-4-12 groups.
pub(super) const UUID_TOKEN_PATTERN: &str =
    r"-[0-9a-z]{8}-[0-9a-z]{4}-[0-9a-z]{4}-[0-9a-z]{4}-[0-9a-z]{12}";

const DEFAULT_SEGMENT: &str = "default";

static PERIODIC_SUFFIX: LazyLock<Regex> = LazyLock::new(|| compile(PERIODIC_SUFFIX_PATTERN));
static UUID_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(UUID_TOKEN_PATTERN));

pub(super) type Strategy = fn(&Container, &str) -> Option<String>;

/// Strategies in precedence order; the first non-empty result wins.
pub(super) const STRATEGIES: [Strategy; 3] = [nomad, registrator, fallback];

/// `nomad.<alloc>.<task>` for containers scheduled as orchestrator tasks.
pub(super) fn nomad(container: &Container, _hostname: &str) -> Option<String> {
    let alloc_name = container.env_value("NOMAD_ALLOC_NAME");
    if alloc_name.is_empty() {
        return None;
    }
    let alloc_name = PERIODIC_SUFFIX.replace_all(alloc_name, "-periodic");
    let job_name = container.env_value("NOMAD_JOB_NAME");
    let task_name = task_segment(container.env_value("NOMAD_TASK_NAME"), job_name);

    Some(format!("nomad.{alloc_name}.{task_name}"))
}

/// `registrator.<service>.<first-tag>.<hostname>` for registered services.
pub(super) fn registrator(container: &Container, hostname: &str) -> Option<String> {
    let service_name = container.env_value("SERVICE_NAME");
    if service_name.is_empty() {
        return None;
    }
    let tag = first_tag(container.env_value("SERVICE_TAGS"));

    Some(format!("registrator.{service_name}.{tag}.{hostname}"))
}

/// `random.<name>.main.<hostname>` built from the display name.
pub(super) fn fallback(container: &Container, hostname: &str) -> Option<String> {
    let name = container.primary_name();
    if name.is_empty() {
        return None;
    }
    let name = strip_uuid(name);

    Some(format!("random.{name}.main.{hostname}"))
}

/// Removes the job prefix and a leading `-` from a task name.
fn task_segment<'a>(task_name: &'a str, job_name: &str) -> &'a str {
    let task = task_name.strip_prefix(job_name).unwrap_or(task_name);
    let task = task.strip_prefix('-').unwrap_or(task);
    if task.is_empty() { DEFAULT_SEGMENT } else { task }
}

fn first_tag(tags: &str) -> &str {
    match tags.split(',').next() {
        Some(tag) if !tag.is_empty() => tag,
        _ => DEFAULT_SEGMENT,
    }
}

fn strip_uuid(name: &str) -> String {
    UUID_TOKEN.replace_all(name, "").into_owned()
}
