/// Splits text into chunks of at most `max_len` bytes, preferring paragraph
/// breaks, then line breaks, then word boundaries, before cutting inside a
/// word as a last resort. Chunk boundaries always fall on char boundaries.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    separators: Vec<&'static str>,
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        Self {
            separators: vec!["\n\n", "\n", " "],
        }
    }
}

impl RecursiveSplitter {
    pub fn split(&self, text: &str, max_len: usize) -> Vec<String> {
        if text.len() <= max_len {
            return vec![text.to_string()];
        }
        self.split_at_level(text, max_len, 0)
    }

    fn split_at_level(&self, text: &str, max_len: usize, level: usize) -> Vec<String> {
        if text.len() <= max_len {
            return vec![text.to_string()];
        }

        let Some(separator) = self.separators.get(level) else {
            return self.hard_split(text, max_len);
        };

        let parts: Vec<&str> = text.split(separator).collect();
        if parts.len() == 1 {
            return self.split_at_level(text, max_len, level + 1);
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for part in parts {
            let joined_len = if current.is_empty() {
                part.len()
            } else {
                current.len() + separator.len() + part.len()
            };

            if joined_len <= max_len {
                if !current.is_empty() {
                    current.push_str(separator);
                }
                current.push_str(part);
                continue;
            }

            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }

            if part.len() > max_len {
                chunks.extend(self.split_at_level(part, max_len, level + 1));
            } else {
                current = part.to_string();
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    fn hard_split(&self, text: &str, max_len: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if !current.is_empty() && current.len() + ch.len_utf8() > max_len {
                chunks.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
