/// A single cell of the playing field. Signed so that a head may
/// transiently lie outside the field under [`WallMode::Lethal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    pub fn wrap(&self, p: Point) -> Point {
        Point::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height))
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Point::new(x, y)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(40, 30)
    }
}

/// Field boundary topology. `Wrap` is toroidal: crossing an edge reenters
/// from the opposite edge. `Lethal` disables wrapping and makes boundary
/// crossing a terminal collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallMode {
    Wrap,
    Lethal,
}
