use std::path::{Path, PathBuf};

/// Replaces the span from the first to the last `#` with `num`, zero-padded
/// to the span's width. A lone `#` is left as is.
pub fn insert_frame(template: &str, num: u64) -> String {
    let (Some(first), Some(last)) = (template.find('#'), template.rfind('#')) else {
        return template.to_string();
    };
    let width = last - first + 1;
    if width < 2 {
        return template.to_string();
    }
    format!("{}{num:0width$}{}", &template[..first], &template[last + 1..])
}

/// [`insert_frame`] on a path. Non-UTF-8 paths are returned unchanged.
pub fn insert_frame_path(path: &Path, num: u64) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(insert_frame(s, num)),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_become_a_padded_number() {
        assert_eq!(insert_frame("frame-####.png", 42), "frame-0042.png");
        assert_eq!(insert_frame("##", 7), "07");
    }

    #[test]
    fn wide_numbers_are_not_truncated() {
        assert_eq!(insert_frame("f-##.png", 12345), "f-12345.png");
    }

    #[test]
    fn single_hash_and_plain_names_are_kept() {
        assert_eq!(insert_frame("shot#.png", 3), "shot#.png");
        assert_eq!(insert_frame("shot.png", 3), "shot.png");
    }

    #[test]
    fn the_whole_first_to_last_span_is_replaced() {
        assert_eq!(insert_frame("a#b#c", 5), "a005c");
    }

    #[test]
    fn paths_keep_their_directories() {
        let p = insert_frame_path(Path::new("out/run-###/img.png"), 9);
        assert_eq!(p, PathBuf::from("out/run-009/img.png"));
    }
}
