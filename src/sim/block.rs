//! Block kinds and their static attributes

use serde::{Deserialize, Serialize};

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Dirt,
    Stone,
    Iron,
    Gold,
    Diamond,
    /// World floor, never minable
    Unbreakable,
    Wood,
    Leaves,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Dirt,
        BlockKind::Stone,
        BlockKind::Iron,
        BlockKind::Gold,
        BlockKind::Diamond,
        BlockKind::Unbreakable,
        BlockKind::Wood,
        BlockKind::Leaves,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Dirt => "dirt",
            BlockKind::Stone => "stone",
            BlockKind::Iron => "iron",
            BlockKind::Gold => "gold",
            BlockKind::Diamond => "diamond",
            BlockKind::Unbreakable => "unbreakable",
            BlockKind::Wood => "wood",
            BlockKind::Leaves => "leaves",
        }
    }
}

/// How hard a block is to mine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hardness {
    Finite(u32),
    Infinite,
}

impl Hardness {
    /// Mining progress needed to break the block, or None if it can't be broken
    pub fn break_threshold(self, multiplier: u32) -> Option<f32> {
        match self {
            Hardness::Finite(h) => Some((h as f32) * (multiplier as f32)),
            Hardness::Infinite => None,
        }
    }
}

/// Static attributes of one block kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockProps {
    pub hardness: Hardness,
    /// Number shown on the block face
    pub value: u32,
    /// RGB display color
    pub color: [u8; 3],
}

/// Read-only lookup from block kind to attributes
///
/// Built once per session and handed to the simulation, so tests can swap in
/// alternate tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTable {
    props: [BlockProps; BlockKind::ALL.len()],
}

impl Default for BlockTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl BlockTable {
    /// The stock block table
    pub fn standard() -> Self {
        let props = BlockKind::ALL.map(|kind| match kind {
            BlockKind::Dirt => BlockProps {
                hardness: Hardness::Finite(1),
                value: 1,
                color: [139, 69, 19],
            },
            BlockKind::Stone => BlockProps {
                hardness: Hardness::Finite(2),
                value: 2,
                color: [128, 128, 128],
            },
            BlockKind::Iron => BlockProps {
                hardness: Hardness::Finite(3),
                value: 3,
                color: [210, 210, 210],
            },
            BlockKind::Gold => BlockProps {
                hardness: Hardness::Finite(3),
                value: 4,
                color: [255, 215, 0],
            },
            BlockKind::Diamond => BlockProps {
                hardness: Hardness::Finite(4),
                value: 5,
                color: [185, 242, 255],
            },
            BlockKind::Unbreakable => BlockProps {
                hardness: Hardness::Infinite,
                value: 9,
                color: [0, 0, 0],
            },
            BlockKind::Wood => BlockProps {
                hardness: Hardness::Finite(1),
                value: 6,
                color: [139, 69, 19],
            },
            BlockKind::Leaves => BlockProps {
                hardness: Hardness::Finite(1),
                value: 7,
                color: [34, 139, 34],
            },
        });
        Self { props }
    }

    /// Replace the attributes of one kind (builder style)
    pub fn with(mut self, kind: BlockKind, props: BlockProps) -> Self {
        self.props[kind.index()] = props;
        self
    }

    #[inline]
    pub fn get(&self, kind: BlockKind) -> &BlockProps {
        &self.props[kind.index()]
    }

    #[inline]
    pub fn hardness(&self, kind: BlockKind) -> Hardness {
        self.get(kind).hardness
    }

    #[inline]
    pub fn value(&self, kind: BlockKind) -> u32 {
        self.get(kind).value
    }

    #[inline]
    pub fn color(&self, kind: BlockKind) -> [u8; 3] {
        self.get(kind).color
    }
}
