pub trait HumanBytes {
    fn human_bytes(&self) -> String;
}

macro_rules! impl_human_bytes {
    ($($t:ty),*) => {
        $(
            impl HumanBytes for $t {
                fn human_bytes(&self) -> String {
                    const KB: f64 = 1024.0;
                    const MB: f64 = KB * 1024.0;

                    let size = *self as f64;
                    match size {
                        s if s >= MB => format!("{:.2} MB", size / MB),
                        s if s >= KB => format!("{:.2} KB", size / KB),
                        _ => format!("{} B", size),
                    }
                }
            }
        )*
    };
}

// Les tailles de buffers qu'on logue sont des usize/u64
impl_human_bytes!(usize, u64);

#[cfg(test)]
mod tests {
    use super::HumanBytes;

    #[test]
    fn test_bytes_to_human_readable() {
        assert_eq!(0usize.human_bytes(), "0 B");
        assert_eq!(999usize.human_bytes(), "999 B");
        assert_eq!(1023usize.human_bytes(), "1023 B");
        assert_eq!(1024usize.human_bytes(), "1.00 KB");
        assert_eq!(1536usize.human_bytes(), "1.50 KB");
        assert_eq!(1024usize.pow(2).human_bytes(), "1.00 MB");
        assert_eq!(((2.5 * 1024.0 * 1024.0) as usize).human_bytes(), "2.50 MB");
    }

    #[test]
    fn test_canvas_sized_buffers() {
        // une surface 1024×800 en RGBA8
        let canvas_bytes = 1024usize * 800 * 4;
        assert_eq!(canvas_bytes.human_bytes(), "3.12 MB");
    }

    #[test]
    fn test_consistency_across_types() {
        let a: usize = 2048;
        let b: u64 = 2048;
        assert_eq!(a.human_bytes(), b.human_bytes());
    }
}
