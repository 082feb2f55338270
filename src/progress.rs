use serde::{Deserialize, Serialize};

pub const ROOM_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    Puzzle,
    Crossword,
    Memory,
    Chase,
}

impl Room {
    pub const ALL: [Room; ROOM_COUNT] = [Room::Puzzle, Room::Crossword, Room::Memory, Room::Chase];

    pub fn index(self) -> usize {
        match self {
            Room::Puzzle => 0,
            Room::Crossword => 1,
            Room::Memory => 2,
            Room::Chase => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Room> {
        Room::ALL.get(idx).copied()
    }

    pub fn next(self) -> Option<Room> {
        Room::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Room> {
        self.index().checked_sub(1).and_then(Room::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            Room::Puzzle => "Picture Puzzle",
            Room::Crossword => "Crossword",
            Room::Memory => "Memory",
            Room::Chase => "Maze Chase",
        }
    }
}

/// What the player has achieved so far. Only solved rooms outlive a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(skip)]
    pub authenticated: bool,
    pub solved: [bool; ROOM_COUNT],
}

impl Progress {
    pub fn is_solved(&self, room: Room) -> bool {
        self.solved[room.index()]
    }

    /// The first room is always open; every later one needs its predecessor.
    pub fn is_unlocked(&self, room: Room) -> bool {
        match room.index() {
            0 => true,
            idx => self.solved[idx - 1],
        }
    }

    /// Marks `room` solved, returning `true` only the first time.
    pub fn mark_solved(&mut self, room: Room) -> bool {
        let slot = &mut self.solved[room.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    pub fn all_solved(&self) -> bool {
        self.solved.iter().all(|s| *s)
    }
}
