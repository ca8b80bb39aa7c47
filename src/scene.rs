use std::time::Instant;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    frame::FrameBuffer,
    grid::{Grid, Occupancy},
    lighting::{self, PointLight},
    material::Color,
    math::Vector2,
    object::{Circle, SceneObject, Square},
};

/// How much one key press changes the light intensity.
pub const INTENSITY_STEP: f64 = 10.;

/// Which thing the next click relocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Circle,
    Square,
    Light,
}

impl Selection {
    /// The selection after this one, cycling circle, square, light.
    pub fn next(self) -> Self {
        match self {
            Self::Circle => Self::Square,
            Self::Square => Self::Light,
            Self::Light => Self::Circle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Light => "Light",
        }
    }
}

/// One cell step for the light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Everything a frame is computed from. Input handling mutates it between
/// frames; lighting only ever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub grid: Grid,
    pub circle: Circle,
    pub square: Square,
    pub light: PointLight,

    /// Whether object edges bounce light.
    pub reflections: bool,

    /// How rough reflections are. At 0, reflected rays are perfectly specular
    /// and frames are fully deterministic.
    pub diffusion: f64,

    /// Whether the light tracks the pointer.
    pub follow_pointer: bool,

    /// The last cell the pointer was seen over.
    pub pointer: (i32, i32),

    pub selection: Selection,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::canvas()
    }
}

impl SceneState {
    /// An empty scene: a light in the corner and two zero-sized objects.
    pub fn new(grid: Grid, light: PointLight) -> Self {
        let light = PointLight {
            position: grid.clamp(light.position),
            ..light
        };

        Self {
            grid,
            circle: Circle::new(Vector2::default(), -1., Color::new(0x00, 0xb0, 0x00)),
            square: Square::new((0, 0), 0, 0, Color::new(0xb0, 0x00, 0x00)),
            light,
            reflections: false,
            diffusion: 0.,
            follow_pointer: false,
            pointer: (0, 0),
            selection: Selection::Circle,
        }
    }

    /// The windowed layout: a 100x70 grid of slightly tall cells with
    /// reflections on.
    ///
    /// The square's height scales by the aspect the same way the circle's
    /// does, which makes it 5x4 here. The original window drew it 5x5.
    pub fn canvas() -> Self {
        let grid = Grid::new(100, 70).with_aspect((1000. / 100.) / (800. / 70.));
        let mut scene = Self::new(grid, PointLight::new((20, 15), 100.));
        scene.circle = Circle::new(Vector2::new(40., 15.), 6., Color::new(0x00, 0xb0, 0x00));
        scene.square =
            Square::aspect_corrected((70, 10), 5, grid.aspect, Color::new(0xb0, 0x00, 0x00));
        scene.reflections = true;
        scene.diffusion = 0.1;
        scene
    }

    /// The character-cell layout: a 100x40 grid of cells twice as tall as
    /// wide, the light following the pointer and no reflections.
    pub fn terminal() -> Self {
        let grid = Grid::new(100, 40).with_aspect(0.5);
        let mut scene = Self::new(grid, PointLight::new((1, 1), 100.));
        scene.circle = Circle::new(Vector2::new(40., 15.), 12., Color::new(0x00, 0xb0, 0x00));
        scene.square =
            Square::aspect_corrected((70, 10), 10, grid.aspect, Color::new(0xb0, 0x00, 0x00));
        scene.follow_pointer = true;
        scene
    }

    /// The objects in rasterization order. Later objects own shared cells.
    pub fn objects(&self) -> [&dyn SceneObject; 2] {
        [&self.circle, &self.square]
    }

    /// Rasterize every object, recording reflective edges when reflections are on.
    pub fn occupancy(&self) -> Occupancy {
        let mut occupancy = Occupancy::new(self.grid);
        for object in self.objects() {
            object.rasterize(&mut occupancy, self.reflections);
        }
        occupancy
    }

    /// Track the pointer, dragging the light along in follow mode.
    pub fn pointer_moved(&mut self, cell: (i32, i32)) -> (i32, i32) {
        let cell = self.grid.clamp(cell);
        self.pointer = cell;
        if self.follow_pointer {
            self.light.position = cell;
        }
        cell
    }

    /// Move the selected thing to the clicked cell and select the next one.
    pub fn click(&mut self, cell: (i32, i32)) {
        let cell = self.pointer_moved(cell);
        match self.selection {
            Selection::Circle => self.circle.move_to(cell),
            Selection::Square => self.square.move_to(cell),
            Selection::Light => self.light.position = cell,
        }
        self.selection = self.selection.next();
    }

    /// Step the light one cell, stopping at the grid edge.
    pub fn nudge_light(&mut self, direction: Direction) {
        let (dx, dy) = direction.offset();
        let (x, y) = self.light.position;
        self.light.position = self.grid.clamp((x + dx, y + dy));
    }

    /// Turn the light up or down, staying within its allowed range.
    pub fn adjust_intensity(&mut self, delta: f64) {
        self.light.intensity = lighting::clamp_intensity(self.light.intensity + delta);
    }

    pub fn toggle_reflections(&mut self) {
        self.reflections = !self.reflections;
    }

    pub fn toggle_follow(&mut self) {
        self.follow_pointer = !self.follow_pointer;
    }
}

/// Light one frame of a scene, drawing reflection jitter from `rng`.
pub fn compute_frame<R: Rng + ?Sized>(scene: &SceneState, rng: &mut R) -> FrameBuffer {
    let start = Instant::now();

    let occupancy = scene.occupancy();
    let mut frame = FrameBuffer::new(&occupancy, &scene.light);
    let lit = lighting::illuminate(&mut frame, &occupancy, &scene.light);

    let mut reflected = 0;
    if scene.reflections {
        reflected = lighting::reflect_all(
            &mut frame,
            &occupancy,
            &scene.light,
            scene.diffusion.max(0.),
            rng,
        );
    }

    debug!(
        "frame {}x{}: {} occupied, {} lit, {} surfaces, {} reflected deposits in {:?}",
        scene.grid.width,
        scene.grid.height,
        occupancy.count(),
        lit,
        occupancy.surfaces.len(),
        reflected,
        start.elapsed()
    );

    frame
}

/// Computes frames, owning the random source used to roughen reflections.
#[derive(Debug, Clone)]
pub struct LightingEngine {
    rng: StdRng,
}

impl Default for LightingEngine {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl LightingEngine {
    /// An engine whose jitter sequence is fixed by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn compute_frame(&mut self, scene: &SceneState) -> FrameBuffer {
        compute_frame(scene, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::{MAX_INTENSITY, MIN_INTENSITY};

    #[test]
    fn test_selection_cycles() {
        let mut scene = SceneState::canvas();
        scene.click((10, 10));
        assert_eq!(scene.circle.center, Vector2::new(10., 10.));
        assert_eq!(scene.selection, Selection::Square);

        scene.click((50, 30));
        assert_eq!(scene.square.origin, (50, 30));
        assert_eq!(scene.selection, Selection::Light);

        scene.click((5, 6));
        assert_eq!(scene.light.position, (5, 6));
        assert_eq!(scene.selection, Selection::Circle);
    }

    #[test]
    fn test_click_clamps_to_grid() {
        let mut scene = SceneState::canvas();
        scene.selection = Selection::Light;
        scene.click((500, -3));
        assert_eq!(scene.light.position, (99, 0));
        assert_eq!(scene.pointer, (99, 0));
    }

    #[test]
    fn test_nudge_stops_at_edges() {
        let mut scene = SceneState::new(Grid::new(5, 5), PointLight::new((0, 4), 100.));
        scene.nudge_light(Direction::Left);
        scene.nudge_light(Direction::Down);
        assert_eq!(scene.light.position, (0, 4));
        scene.nudge_light(Direction::Up);
        scene.nudge_light(Direction::Right);
        assert_eq!(scene.light.position, (1, 3));
    }

    #[test]
    fn test_intensity_adjust_clamps() {
        let mut scene = SceneState::canvas();
        for _ in 0..20 {
            scene.adjust_intensity(INTENSITY_STEP);
        }
        assert_eq!(scene.light.intensity, MAX_INTENSITY);
        for _ in 0..30 {
            scene.adjust_intensity(-INTENSITY_STEP);
        }
        assert_eq!(scene.light.intensity, MIN_INTENSITY);
    }

    #[test]
    fn test_follow_pointer() {
        let mut scene = SceneState::canvas();
        scene.pointer_moved((30, 30));
        assert_eq!(scene.light.position, (20, 15));

        scene.toggle_follow();
        scene.pointer_moved((30, 30));
        assert_eq!(scene.light.position, (30, 30));
    }

    #[test]
    fn test_toggle_reflections_clears_surfaces() {
        let mut scene = SceneState::canvas();
        assert!(!scene.occupancy().surfaces.is_empty());
        scene.toggle_reflections();
        assert!(scene.occupancy().surfaces.is_empty());
    }

    #[test]
    fn test_new_clamps_light() {
        let scene = SceneState::new(Grid::new(5, 5), PointLight::new((9, -2), 100.));
        assert_eq!(scene.light.position, (4, 0));
        assert_eq!(scene.occupancy().count(), 0);
    }

    #[test]
    fn test_presets() {
        let canvas = SceneState::canvas();
        assert_eq!((canvas.square.width, canvas.square.height), (5, 4));
        assert!(canvas.reflections);

        let terminal = SceneState::terminal();
        assert!(terminal.follow_pointer);
        assert!(!terminal.reflections);
        assert_eq!((terminal.square.width, terminal.square.height), (10, 5));
        assert!(terminal.occupancy().is_occupied((40, 15)));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let scene = SceneState::canvas();
        let a = LightingEngine::seeded(3).compute_frame(&scene);
        let b = LightingEngine::seeded(3).compute_frame(&scene);
        assert_eq!(a, b);
    }
}
