use std::collections::VecDeque;

use super::{action::Direction, grid::Cell};

/// Points needed per level
pub const POINTS_PER_LEVEL: u32 = 100;

/// Level for a given score, `floor(score / 100) + 1`
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Create a snake from head-first segments
    ///
    /// Returns `None` for an empty body or one that overlaps itself.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        for (i, cell) in body.iter().enumerate() {
            if body.iter().skip(i + 1).any(|other| other == cell) {
                return None;
            }
        }
        Some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Segments head-first
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Check if a cell is occupied by any segment
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if moving the head onto `cell` would hit the body
    ///
    /// The tail is left out unless the snake is growing: it vacates its cell
    /// in the same tick the head moves.
    pub fn blocks(&self, cell: Cell, growing: bool) -> bool {
        let considered = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(considered).any(|&seg| seg == cell)
    }

    /// Push a new head, dropping the tail unless growing
    fn push_head(&mut self, head: Cell, grow: bool) {
        self.body.push_front(head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Per-run entity state: snake, heading, food and score
///
/// Owned by one session; a fresh value is built for every run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Committed heading, `None` until the first steering input
    heading: Option<Direction>,
    /// Heading the snake last actually moved in
    travelled: Option<Direction>,
    pub food: Cell,
    score: u32,
}

impl GameState {
    /// Create a state with the given snake and food, no heading and zero score
    pub fn new(snake: Snake, food: Cell) -> Self {
        Self {
            snake,
            heading: None,
            travelled: None,
            food,
            score: 0,
        }
    }

    /// Put the snake back to a single segment at `origin` and clear progress
    ///
    /// The food cell is left alone; the engine respawns it.
    pub fn reset(&mut self, origin: Cell) {
        self.snake = Snake::new(origin);
        self.heading = None;
        self.travelled = None;
        self.score = 0;
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Commit a new heading unless it reverses the snake
    ///
    /// A heading that is the reverse of the committed heading, or of the
    /// direction the snake last moved in, is ignored. Returns whether the
    /// heading was taken.
    pub fn apply_heading(&mut self, heading: Direction) -> bool {
        let reverses = |current: Option<Direction>| current.is_some_and(|c| c.is_opposite(heading));
        // Checking `travelled` too stops two quick turns from folding the head back
        if reverses(self.heading) || reverses(self.travelled) {
            return false;
        }
        self.heading = Some(heading);
        true
    }

    /// Cell the head would enter this tick, `None` while no heading is set
    pub fn next_head(&self) -> Option<Cell> {
        self.heading
            .map(|dir| self.snake.head().moved_in_direction(dir))
    }

    /// Move the head onto `head`, growing by one if `grow` is set
    pub fn advance(&mut self, head: Cell, grow: bool) {
        self.snake.push_head(head, grow);
        self.travelled = self.heading;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    /// Add points to the score
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_cells(cells.iter().map(|&(c, r)| Cell::new(c, r))).unwrap()
    }

    #[test]
    fn test_snake_creation() {
        let snake = snake(&[(5, 5), (4, 5), (3, 5)]);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn test_snake_rejects_bad_bodies() {
        assert!(Snake::from_cells(Vec::new()).is_none());
        assert!(Snake::from_cells([Cell::new(1, 1), Cell::new(1, 1)]).is_none());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = snake(&[(5, 5), (4, 5), (3, 5)]);

        snake.push_head(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));

        snake.push_head(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_tail_is_not_blocking_unless_growing() {
        let snake = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)]);

        assert!(!snake.blocks(Cell::new(6, 5), false));
        assert!(snake.blocks(Cell::new(6, 5), true));
        assert!(snake.blocks(Cell::new(6, 6), false));
        assert!(!snake.blocks(Cell::new(9, 9), false));
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new(snake(&[(5, 5), (4, 5)]), Cell::new(1, 1));
        state.apply_heading(Direction::Right);
        state.award(250);

        state.reset(Cell::new(10, 10));

        assert_eq!(state.snake, Snake::new(Cell::new(10, 10)));
        assert_eq!(state.heading(), None);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn test_reverse_heading_is_ignored() {
        let mut state = GameState::new(Snake::new(Cell::new(10, 10)), Cell::new(0, 0));

        assert!(state.apply_heading(Direction::Right));
        assert!(!state.apply_heading(Direction::Left));
        assert_eq!(state.heading(), Some(Direction::Right));

        assert!(state.apply_heading(Direction::Up));
        assert_eq!(state.heading(), Some(Direction::Up));
    }

    #[test]
    fn test_quick_double_turn_cannot_reverse() {
        let mut state = GameState::new(Snake::new(Cell::new(10, 10)), Cell::new(0, 0));
        state.apply_heading(Direction::Right);
        let head = state.next_head().unwrap();
        state.advance(head, false);

        // Up then Left inside one tick would fold the snake back on itself
        assert!(state.apply_heading(Direction::Up));
        assert!(!state.apply_heading(Direction::Left));
        assert_eq!(state.heading(), Some(Direction::Up));
    }

    #[test]
    fn test_no_heading_means_no_next_head() {
        let state = GameState::new(Snake::new(Cell::new(10, 10)), Cell::new(0, 0));
        assert_eq!(state.next_head(), None);
    }

    #[test]
    fn test_level_follows_score() {
        let mut state = GameState::new(Snake::new(Cell::new(0, 0)), Cell::new(1, 1));
        assert_eq!(state.level(), 1);

        state.award(99);
        assert_eq!(state.level(), 1);

        state.award(1);
        assert_eq!(state.level(), 2);

        state.award(250);
        assert_eq!(state.score(), 350);
        assert_eq!(state.level(), 4);
    }

    #[test]
    fn test_level_for_score() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(100), 2);
        assert_eq!(level_for_score(199), 2);
        assert_eq!(level_for_score(1000), 11);
    }
}
