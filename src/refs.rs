use tracing::trace;

const PEELED_SUFFIX: &str = "^{}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    pub id: String,
    pub name: String,
}

impl Ref {
    pub fn new(id: &str, name: &str) -> Self {
        Ref {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }
}

pub type Refs = Vec<Ref>;

/// What a server announces before negotiation: its refs, in order, and its capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advertisement {
    pub refs: Refs,
    pub capabilities: Vec<String>,
}

/// Parse a ref advertisement.
///
/// Lines with fewer than two fields are ignored, as are peeled tags. Only the
/// very first line may carry the capability list, after a NUL following the ref name.
pub fn parse_advertisement(response: &str) -> Advertisement {
    let mut advertisement = Advertisement::default();

    for (i, line) in response.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (id, name) = match (fields.next(), fields.next()) {
            (Some(id), Some(name)) => (id, name),
            (Some(_), None) => {
                trace!(line = i, "skipping advertisement line with a single field");
                continue;
            }
            _ => continue,
        };

        let name = match name.find('\0') {
            Some(nul) if i == 0 => {
                let start = name.as_ptr() as usize - line.as_ptr() as usize;
                advertisement.capabilities = parse_capabilities(&line[start + nul + 1..]);
                &name[..nul]
            }
            _ => name,
        };

        if name.ends_with(PEELED_SUFFIX) {
            continue;
        }

        advertisement.refs.push(Ref::new(id, name));
    }

    advertisement
}

// split on single spaces, empty tokens dropped
fn parse_capabilities(caps: &str) -> Vec<String> {
    caps.trim()
        .split(' ')
        .filter(|c| !c.is_empty())
        .map(|c| c.to_owned())
        .collect()
}
