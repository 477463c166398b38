use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// A domain name as a sequence of raw labels, without the terminating root
/// label. Comparison is byte-exact: case is preserved as decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Box<[u8]>>,
}

impl Name {
    pub fn root() -> Self {
        Self::default()
    }

    pub(crate) fn from_labels(labels: Vec<Box<[u8]>>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(|l| l.as_ref())
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the uncompressed wire form, terminating zero octet included.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

impl FromStr for Name {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut labels = Vec::new();
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "empty label in '{}'",
                    s
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' exceeds {} bytes",
                    label, MAX_LABEL_LEN
                )));
            }
            labels.push(label.as_bytes().into());
        }

        let name = Self { labels };
        if name.wire_len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' exceeds {} bytes",
                s, MAX_NAME_LEN
            )));
        }
        Ok(name)
    }
}

/// Presentation form with a trailing dot; bytes outside printable ASCII and
/// the special characters `.` and `\` are escaped.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        for label in &self.labels {
            for &b in label.iter() {
                match b {
                    b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x21..=0x7e => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
            write!(f, ".")?;
        }
        Ok(())
    }
}
