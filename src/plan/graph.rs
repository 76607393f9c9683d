use crate::plan::types::*;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tracing::debug;

/// Task dependency graph with forward and reverse adjacency indices.
///
/// Nodes and edges are registered without validation; callers run
/// [`validate_references`](Self::validate_references) and
/// [`has_cycle`](Self::has_cycle) before asking for derived orderings.
/// Iteration over nodes follows registration order, so results are stable
/// for identical input sequences. Each planning call owns its own graph;
/// nothing is shared or persisted.
#[derive(Clone, Debug)]
pub struct DependencyGraph {
    /// All tasks indexed by id
    nodes: HashMap<String, TaskDescriptor>,
    /// Task ids in registration order
    order: Vec<String>,
    /// task id -> ids it depends on
    edges: HashMap<String, Vec<String>>,
    /// task id -> ids that depend on it
    reverse_edges: HashMap<String, Vec<String>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Explicit-stack frame for critical-path reconstruction
enum PathFrame<'a> {
    Enter(&'a str),
    Leave(&'a str),
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: HashMap::new(),
            reverse_edges: HashMap::new(),
        }
    }

    /// Build a graph from a task list.
    ///
    /// Fails with [`PlanError::MalformedTask`] when a task has no id.
    /// Dependency ids are registered as declared; unknown references are
    /// caught later by [`validate_references`](Self::validate_references).
    pub fn from_tasks(tasks: &[TaskDescriptor]) -> Result<Self, PlanError> {
        let mut graph = Self::new();

        for (index, task) in tasks.iter().enumerate() {
            if task.id.trim().is_empty() {
                return Err(PlanError::MalformedTask { index });
            }
            graph.add_task(task.clone());
        }

        for task in tasks {
            for dep in &task.dependencies {
                graph.add_dependency(&task.id, dep);
            }
        }

        debug!(
            "built dependency graph with {} tasks and {} edges",
            graph.len(),
            graph.edges.values().map(Vec::len).sum::<usize>()
        );
        Ok(graph)
    }

    /// Register a task node, overwriting any prior data for the same id.
    /// The id keeps its original position in iteration order.
    pub fn add_task(&mut self, task: TaskDescriptor) {
        if !self.nodes.contains_key(&task.id) {
            self.order.push(task.id.clone());
        }
        self.nodes.insert(task.id.clone(), task);
    }

    /// Add a directed dependency edge in both indices. Duplicates are ignored.
    pub fn add_dependency(&mut self, task_id: &str, depends_on: &str) {
        let deps = self.edges.entry(task_id.to_string()).or_default();
        if !deps.iter().any(|d| d == depends_on) {
            deps.push(depends_on.to_string());
        }

        let dependents = self.reverse_edges.entry(depends_on.to_string()).or_default();
        if !dependents.iter().any(|d| d == task_id) {
            dependents.push(task_id.to_string());
        }
    }

    /// Look up a task by id
    pub fn task(&self, id: &str) -> Option<&TaskDescriptor> {
        self.nodes.get(id)
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no tasks
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Task ids in registration order
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Declared dependencies of a task (deduplicated, declaration order)
    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct dependents of a task (registration order)
    pub fn dependents_of(&self, id: &str) -> &[String] {
        self.reverse_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Verify every declared dependency names a registered task.
    ///
    /// Runs before any derived computation so a typo in a dependency id
    /// fails fast instead of silently dropping an ordering constraint.
    pub fn validate_references(&self) -> Result<(), PlanError> {
        for id in &self.order {
            for dep in self.dependencies_of(id) {
                if !self.nodes.contains_key(dep) {
                    return Err(PlanError::UnknownDependency {
                        task_id: id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Detect whether any dependency cycle exists.
    ///
    /// Depth-first traversal with gray/black coloring over an explicit stack;
    /// every node is visited once, O(V+E). A self-loop counts as a one-node
    /// cycle.
    pub fn has_cycle(&self) -> bool {
        let mut colors: HashMap<&str, Color> = HashMap::with_capacity(self.order.len());

        for id in &self.order {
            if color_of(&colors, id) != Color::White {
                continue;
            }
            if self.has_cycle_from(id, &mut colors) {
                return true;
            }
        }
        false
    }

    fn has_cycle_from<'a>(&'a self, start: &'a str, colors: &mut HashMap<&'a str, Color>) -> bool {
        // (node, index of next dependency to examine)
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        colors.insert(start, Color::Gray);

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let (node, next) = stack[top];
            let deps = self.dependencies_of(node);

            if next < deps.len() {
                stack[top].1 = next + 1;
                let dep = deps[next].as_str();
                match color_of(colors, dep) {
                    // Reaching a node on the current traversal path closes a loop
                    Color::Gray => return true,
                    Color::White => {
                        colors.insert(dep, Color::Gray);
                        stack.push((dep, 0));
                    }
                    Color::Black => {}
                }
            } else {
                colors.insert(node, Color::Black);
                stack.pop();
            }
        }
        false
    }

    /// Produce one dependency-respecting linear order of all task ids.
    ///
    /// Kahn's algorithm; the zero-in-degree queue is seeded and drained in
    /// registration order (FIFO). The order among independent tasks is
    /// stable for identical insertion order but otherwise non-canonical —
    /// callers must not rely on a specific interleaving.
    pub fn topological_sort(&self) -> Result<Vec<String>, PlanError> {
        let mut in_degree: HashMap<&str, usize> = HashMap::with_capacity(self.order.len());
        for id in &self.order {
            in_degree.insert(id.as_str(), self.dependencies_of(id).len());
        }

        let mut queue: VecDeque<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|id| in_degree.get(id).copied() == Some(0))
            .collect();

        let mut result = Vec::with_capacity(self.order.len());
        while let Some(node) = queue.pop_front() {
            result.push(node.to_string());

            for dependent in self.dependents_of(node) {
                if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dependent.as_str());
                    }
                }
            }
        }

        // Nodes left with positive in-degree sit on a cycle
        if result.len() != self.nodes.len() {
            return Err(PlanError::CyclicDependency);
        }

        Ok(result)
    }

    /// Compute the dependency depth of every task.
    ///
    /// `level(t)` is 0 for tasks without dependencies, otherwise
    /// `1 + max(level(d))` over its dependencies. Memoized so shared
    /// dependencies are computed once. Only meaningful on a graph already
    /// validated acyclic.
    pub fn assign_levels(&self) -> HashMap<String, usize> {
        let mut levels: HashMap<&str, usize> = HashMap::with_capacity(self.order.len());

        for id in &self.order {
            if levels.contains_key(id.as_str()) {
                continue;
            }

            let mut stack: Vec<&str> = vec![id.as_str()];
            while let Some(&node) = stack.last() {
                if levels.contains_key(node) {
                    stack.pop();
                    continue;
                }

                let deps = self.dependencies_of(node);
                let mut max_dep_level = 0usize;
                let mut ready = true;
                for dep in deps {
                    match levels.get(dep.as_str()) {
                        Some(&level) => max_dep_level = max_dep_level.max(level),
                        None => {
                            ready = false;
                            stack.push(dep.as_str());
                        }
                    }
                }

                if ready {
                    let level = if deps.is_empty() { 0 } else { max_dep_level + 1 };
                    levels.insert(node, level);
                    stack.pop();
                }
            }
        }

        levels
            .into_iter()
            .map(|(id, level)| (id.to_string(), level))
            .collect()
    }

    /// Partition tasks into ordered phases.
    ///
    /// Levels are processed in ascending order. Within a level the
    /// parallel-safe tasks form one phase; each unsafe task then gets its
    /// own singleton phase, in registration order. Tasks at one level share
    /// no ordering constraint, so serializing only the unsafe ones is the
    /// sole restriction the phases add.
    pub fn parallel_groups(&self, levels: &HashMap<String, usize>) -> Vec<Vec<String>> {
        let mut by_level: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for id in &self.order {
            if let Some(&level) = levels.get(id) {
                by_level.entry(level).or_default().push(id.as_str());
            }
        }

        let mut groups = Vec::new();
        for ids in by_level.values() {
            let mut safe = Vec::new();
            let mut unsafe_tasks = Vec::new();

            for &id in ids {
                if self.nodes.get(id).is_some_and(|t| !t.parallel_safe) {
                    unsafe_tasks.push(id.to_string());
                } else {
                    safe.push(id.to_string());
                }
            }

            if !safe.is_empty() {
                groups.push(safe);
            }
            for task in unsafe_tasks {
                groups.push(vec![task]);
            }
        }

        groups
    }

    /// Earliest start time (minutes) of every task, computed in the given
    /// topological order: 0 for dependency-free tasks, otherwise the latest
    /// finish time among dependencies.
    pub fn earliest_starts(&self, execution_order: &[String]) -> HashMap<String, u64> {
        let mut starts: HashMap<String, u64> = HashMap::with_capacity(execution_order.len());

        for id in execution_order {
            let start = self
                .dependencies_of(id)
                .iter()
                .filter_map(|dep| {
                    let dep_start = starts.get(dep.as_str())?;
                    let dep_task = self.nodes.get(dep.as_str())?;
                    Some(dep_start + u64::from(dep_task.duration_minutes()))
                })
                .max()
                .unwrap_or(0);
            starts.insert(id.clone(), start);
        }

        starts
    }

    /// Find the longest duration-weighted chain from a dependency-free task
    /// to a task with no dependents, returning the path and its total
    /// duration in minutes.
    ///
    /// Reconstruction walks forward through the reverse index from every
    /// root with an explicit stack. Ties in total duration resolve to the
    /// first path discovered under registration order; when several chains
    /// tie there is no canonical winner.
    pub fn critical_path(&self, execution_order: &[String]) -> (Vec<String>, u64) {
        let mut best_path: Vec<String> = Vec::new();
        let mut best_time: u64 = 0;

        let roots = execution_order
            .iter()
            .filter(|id| self.dependencies_of(id.as_str()).is_empty());

        for root in roots {
            let mut path: Vec<&str> = Vec::new();
            let mut elapsed: u64 = 0;
            let mut stack = vec![PathFrame::Enter(root.as_str())];

            while let Some(frame) = stack.pop() {
                match frame {
                    PathFrame::Enter(node) => {
                        path.push(node);
                        elapsed += self.duration_of(node);
                        stack.push(PathFrame::Leave(node));

                        let dependents = self.dependents_of(node);
                        if dependents.is_empty() {
                            if elapsed > best_time {
                                best_time = elapsed;
                                best_path = path.iter().map(|s| s.to_string()).collect();
                            }
                        } else {
                            // Reverse push so the first-registered dependent
                            // is explored first
                            for dependent in dependents.iter().rev() {
                                stack.push(PathFrame::Enter(dependent.as_str()));
                            }
                        }
                    }
                    PathFrame::Leave(node) => {
                        path.pop();
                        elapsed -= self.duration_of(node);
                    }
                }
            }
        }

        (best_path, best_time)
    }

    fn duration_of(&self, id: &str) -> u64 {
        self.nodes
            .get(id)
            .map(|t| u64::from(t.duration_minutes()))
            .unwrap_or(0)
    }

    /// All tasks the given task transitively depends on (excluding itself)
    pub fn transitive_dependencies(&self, task_id: &str) -> HashSet<String> {
        closure(task_id, &self.edges)
    }

    /// All tasks that transitively depend on the given task (excluding itself)
    pub fn transitive_dependents(&self, task_id: &str) -> HashSet<String> {
        closure(task_id, &self.reverse_edges)
    }

    /// Whether two tasks may run at the same time: neither transitively
    /// depends on the other, and both are marked parallel-safe.
    pub fn can_run_concurrently(&self, first: &str, second: &str) -> bool {
        if self.transitive_dependencies(first).contains(second) {
            return false;
        }
        if self.transitive_dependencies(second).contains(first) {
            return false;
        }

        let first_safe = self.nodes.get(first).is_some_and(|t| t.parallel_safe);
        let second_safe = self.nodes.get(second).is_some_and(|t| t.parallel_safe);
        first_safe && second_safe
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn color_of(colors: &HashMap<&str, Color>, id: &str) -> Color {
    colors.get(id).copied().unwrap_or(Color::White)
}

/// Reachable set from `start` over `adjacency`, excluding `start` itself
fn closure(start: &str, adjacency: &HashMap<String, Vec<String>>) -> HashSet<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        if let Some(next) = adjacency.get(node) {
            for neighbor in next {
                stack.push(neighbor.as_str());
            }
        }
    }

    visited.remove(start);
    visited.into_iter().map(str::to_string).collect()
}
