use std::fmt;

/// One of the six named variable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    A,
    B,
    C,
    X,
    Y,
    Z,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::A,
        Variable::B,
        Variable::C,
        Variable::X,
        Variable::Y,
        Variable::Z,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of all variable slots, each defaulting to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Variables([f64; 6]);

impl Variables {
    pub fn get(
        &self,
        variable: Variable,
    ) -> f64 {
        self.0[variable.slot()]
    }

    pub fn set(
        &mut self,
        variable: Variable,
        value: f64,
    ) {
        self.0[variable.slot()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        Variable::ALL.iter().map(|&v| (v, self.get(v)))
    }
}
