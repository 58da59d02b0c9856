//! A pretend component tree that "renders" with random cost and reports each
//! render to the profiler, the way instrumented UI code would.

use std::time::Duration;

use paintflash_core::RenderProfiler;
use paintflash_protocol::{ColorClass, Rect};
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::layout::{Margin, Rect as Area};

const GRID: u16 = 3;

/// Name and typical render cost of each root, in grid order.
const ROOTS: [(&str, f64); 9] = [
    ("Header", 2.0),
    ("Search", 4.0),
    ("Avatar", 3.0),
    ("Sidebar", 6.0),
    ("Feed", 12.0),
    ("Chart", 25.0),
    ("Table", 18.0),
    ("Footer", 1.0),
    ("Modal", 40.0),
];

/// `(parent, name, cost)`: children re-render whenever their parent does.
const CHILDREN: [(&str, &str, f64); 2] = [("Feed", "FeedItem", 8.0), ("Chart", "Tooltip", 5.0)];

#[derive(Debug, Clone)]
pub struct Component {
    pub name: &'static str,
    pub area: Area,
    cost_ms: f64,
    children: Vec<usize>,
}

#[derive(Debug)]
pub struct Demo {
    components: Vec<Component>,
    roots: usize,
    rng: StdRng,
}

impl Demo {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut components: Vec<Component> = ROOTS
            .iter()
            .map(|&(name, cost_ms)| Component {
                name,
                area: Area::default(),
                cost_ms,
                children: Vec::new(),
            })
            .collect();
        let roots = components.len();
        for (parent, name, cost_ms) in CHILDREN {
            let child = components.len();
            components.push(Component {
                name,
                area: Area::default(),
                cost_ms,
                children: Vec::new(),
            });
            if let Some(p) = components.iter_mut().position(|c| c.name == parent) {
                components[p].children.push(child);
            }
        }

        Self {
            components,
            roots,
            rng,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn root_count(&self) -> usize {
        self.roots
    }

    /// Lay the roots out on a grid inside `area`; children sit inset in
    /// their parent.
    pub fn layout(&mut self, area: Area) {
        let cell_w = area.width / GRID;
        let cell_h = area.height / GRID;
        for (i, component) in self.components[..self.roots].iter_mut().enumerate() {
            let (col, row) = (i as u16 % GRID, i as u16 / GRID);
            component.area = Area::new(
                area.x + col * cell_w,
                area.y + row * cell_h,
                cell_w,
                cell_h,
            );
        }
        for p in 0..self.roots {
            let inner = self.components[p].area.inner(Margin::new(2, 2));
            let children = self.components[p].children.clone();
            for c in children {
                self.components[c].area = inner;
            }
        }
    }

    /// Render root `index` and its subtree.
    pub fn render(&mut self, index: usize, profiler: &mut RenderProfiler) {
        if index >= self.components.len() {
            return;
        }
        let duration = self.sample_cost(index);
        let component = &self.components[index];
        profiler.record_render(component.name, duration, to_rect(component.area));

        let children = component.children.clone();
        for child in children {
            self.render(child, profiler);
        }
    }

    pub fn render_random(&mut self, profiler: &mut RenderProfiler) {
        let index = self.rng.gen_range(0..self.roots);
        self.render(index, profiler);
    }

    /// A burst of renders, as after a state change high in the tree.
    pub fn burst(&mut self, profiler: &mut RenderProfiler) {
        let count = self.rng.gen_range(3..=self.roots);
        for _ in 0..count {
            self.render_random(profiler);
        }
    }

    fn sample_cost(&mut self, index: usize) -> Duration {
        let jitter: f64 = self.rng.gen_range(0.5..2.0);
        Duration::from_secs_f64(self.components[index].cost_ms * jitter / 1000.0)
    }
}

pub fn to_rect(area: Area) -> Rect {
    Rect::new(
        f64::from(area.x),
        f64::from(area.y),
        f64::from(area.width),
        f64::from(area.height),
    )
}

/// Human-readable class, for the status line.
pub fn describe(class: ColorClass) -> &'static str {
    match class {
        ColorClass::Ok => "fast",
        ColorClass::Warn => "slow",
        ColorClass::Error => "janky",
    }
}
