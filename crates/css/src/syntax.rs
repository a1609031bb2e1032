/// A single declaration, `name: value`. Names are lowercased.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// Parse the body of a `style` attribute.
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                name,
                value: value.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_skip_empty_pairs() {
        let decls = parse_declarations("White-Space: pre; ; color:red;font-size:");
        assert_eq!(
            decls,
            vec![
                Declaration {
                    name: "white-space".into(),
                    value: "pre".into()
                },
                Declaration {
                    name: "color".into(),
                    value: "red".into()
                },
            ]
        );
    }
}
