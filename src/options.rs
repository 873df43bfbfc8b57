/// Options for the graph generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub weighted: bool,
    pub directed: bool,
    pub permuted: bool,
}

impl GeneratorOptions {
    pub const fn new() -> Self {
        Self {
            weighted: false,
            directed: true,
            permuted: false,
        }
    }

    pub const fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub const fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub const fn permuted(mut self, permuted: bool) -> Self {
        self.permuted = permuted;
        self
    }

    /// Sets a flag by name, unknown names are ignored.
    pub fn set_flag(&mut self, flag: Option<String>, value: bool) {
        if let Some(f) = flag {
            match f.as_str() {
                "weighted" | "weight" => self.weighted = value,
                "directed" => self.directed = value,
                "permuted" | "permutation" => self.permuted = value,
                _ => {}
            }
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for the result checkers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub verbose: usize,
}

impl CheckOptions {
    pub const fn new() -> Self {
        Self { verbose: 1 }
    }

    pub const fn quiet() -> Self {
        Self { verbose: 0 }
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::options::GeneratorOptions;

    #[test]
    fn test_generator_defaults() {
        let opts = GeneratorOptions::new();
        assert!(!opts.weighted);
        assert!(opts.directed);
        assert!(!opts.permuted);
    }

    #[test]
    fn test_set_flag() {
        let mut opts = GeneratorOptions::new();
        opts.set_flag(Some("weight".to_string()), true);
        opts.set_flag(Some("directed".to_string()), false);
        opts.set_flag(Some("bogus".to_string()), true);
        opts.set_flag(None, true);

        assert_eq!(opts, GeneratorOptions::new().weighted(true).directed(false));
    }
}
