//! The three predicted aspects of a bike and their enumerated domains.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of bike.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BikeType {
    Bike,
    Children,
    Cargo,
}

impl BikeType {
    pub const ALL: [BikeType; 3] = [BikeType::Bike, BikeType::Children, BikeType::Cargo];

    /// Wire value used by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            BikeType::Bike => "bike",
            BikeType::Children => "children",
            BikeType::Cargo => "cargo",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BikeType::Bike => "Bike",
            BikeType::Children => "Children Bike",
            BikeType::Cargo => "Cargo Bike",
        }
    }
}

/// Frame shape.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    Diamond,
    Trapeze,
    SwanNeck,
    LowEntry,
    X,
    Y,
}

impl Frame {
    pub const ALL: [Frame; 6] = [
        Frame::Diamond,
        Frame::Trapeze,
        Frame::SwanNeck,
        Frame::LowEntry,
        Frame::X,
        Frame::Y,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frame::Diamond => "diamond",
            Frame::Trapeze => "trapeze",
            Frame::SwanNeck => "swan_neck",
            Frame::LowEntry => "low_entry",
            Frame::X => "x",
            Frame::Y => "y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frame::Diamond => "Diamond",
            Frame::Trapeze => "Trapeze",
            Frame::SwanNeck => "Swan Neck",
            Frame::LowEntry => "Low Entry",
            Frame::X => "X Frame",
            Frame::Y => "Y Frame",
        }
    }
}

/// Dominant frame color.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    White,
    Gray,
    Blue,
    Red,
    Yellow,
    Green,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Black,
        Color::White,
        Color::Gray,
        Color::Blue,
        Color::Red,
        Color::Yellow,
        Color::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Gray => "Gray",
            Color::Blue => "Blue",
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
        }
    }
}

macro_rules! impl_wire_str {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ();

            /// Parses the exact wire value (e.g. `swan_neck`).
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or(())
            }
        }
    };
}

impl_wire_str!(BikeType);
impl_wire_str!(Frame);
impl_wire_str!(Color);

/// Names one of the three aspects, e.g. to address a select control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aspect {
    Bike,
    Frame,
    Color,
}

impl Aspect {
    pub const ALL: [Aspect; 3] = [Aspect::Bike, Aspect::Frame, Aspect::Color];

    /// Query parameter / JSON field name.
    pub fn field_name(&self) -> &'static str {
        match self {
            Aspect::Bike => "bike",
            Aspect::Frame => "frame",
            Aspect::Color => "color",
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// The inferred (bike type, frame, color) of a posting. Also the payload of
/// a correction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Prediction {
    pub bike: BikeType,
    pub frame: Frame,
    pub color: Color,
}
