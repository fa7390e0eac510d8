//! Tab operations accepted by `navdeck tabs`.

use std::fmt;
use std::str::FromStr;

/// One scripted tab-session step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabOp {
    /// `visit:/path` commits a navigation
    Visit(String),
    /// `close:/path`
    Close(String),
    /// `others:/path` closes every closable tab but this one
    Others(String),
    /// `all`
    All,
    /// `activate:/path`
    Activate(String),
    /// `move:/path:index`
    Move(String, usize),
}

impl FromStr for TabOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(TabOp::All);
        }
        let Some((verb, arg)) = s.split_once(':') else {
            return Err(format!("invalid tab operation '{s}'"));
        };
        if arg.is_empty() {
            return Err(format!("tab operation '{verb}' needs a path"));
        }
        match verb {
            "visit" => Ok(TabOp::Visit(arg.to_string())),
            "close" => Ok(TabOp::Close(arg.to_string())),
            "others" => Ok(TabOp::Others(arg.to_string())),
            "activate" => Ok(TabOp::Activate(arg.to_string())),
            "move" => {
                let (path, index) = arg
                    .rsplit_once(':')
                    .ok_or_else(|| format!("'move:{arg}' is missing a target index"))?;
                let index = index
                    .parse::<usize>()
                    .map_err(|_| format!("invalid tab index '{index}'"))?;
                Ok(TabOp::Move(path.to_string(), index))
            }
            other => Err(format!("unknown tab operation '{other}'")),
        }
    }
}

impl fmt::Display for TabOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabOp::Visit(p) => write!(f, "visit:{p}"),
            TabOp::Close(p) => write!(f, "close:{p}"),
            TabOp::Others(p) => write!(f, "others:{p}"),
            TabOp::All => write!(f, "all"),
            TabOp::Activate(p) => write!(f, "activate:{p}"),
            TabOp::Move(p, i) => write!(f, "move:{p}:{i}"),
        }
    }
}
