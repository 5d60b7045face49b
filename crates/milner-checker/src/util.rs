/// Names a number as `'a`, `'b`, ..., `'z`, `'aa`, `'ab`, ...
pub fn format_radix(mut x: usize) -> String {
    let mut result = vec![];
    loop {
        result.push(char::from(b'a' + (x % 26) as u8));
        x /= 26;
        if x == 0 {
            break;
        }
        x -= 1;
    }
    format!("'{}", result.into_iter().rev().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::format_radix;

    #[test]
    fn names_wrap_after_z() {
        assert_eq!(format_radix(0), "'a");
        assert_eq!(format_radix(25), "'z");
        assert_eq!(format_radix(26), "'aa");
        assert_eq!(format_radix(27), "'ab");
        assert_eq!(format_radix(52), "'ba");
    }
}
