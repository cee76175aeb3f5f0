/// Token the producer sends when the measurement is over.
pub const SENTINEL: &str = "STOP";
pub fn is_sentinel(line: &str) -> bool {
    line.trim() == SENTINEL
}
