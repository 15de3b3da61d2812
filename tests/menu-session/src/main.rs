use predicates::str::contains;
use ramdev_test_executables::RAM_CLIENT;
use ramdev_test_validate::menu_session;

fn main() {}

#[test]
fn write_then_read_back() {
    // Write a line, seek back to the start, read it out again.
    menu_session(RAM_CLIENT, &[], "1\nhello there\n3\n0\n0\n2\n11\n7\n")
        .success()
        .stdout(contains("Wrote 11 bytes"))
        .stdout(contains("Read: hello there"));
}

#[test]
fn vowels_counted_and_cleared() {
    menu_session(RAM_CLIENT, &[], "1\nAEIOUaeiou\n6\n4\n6\n7\n")
        .success()
        .stdout(contains("Vowel count in buffer: 10"))
        .stdout(contains("Buffer cleared."))
        .stdout(contains("Vowel count in buffer: 0"));
}

#[test]
fn reports_default_capacity() {
    menu_session(RAM_CLIENT, &[], "5\n7\n")
        .success()
        .stdout(contains("Buffer size: 1024 bytes"));
}

#[test]
fn writes_clamp_at_a_small_capacity() {
    let fill = "x".repeat(100);
    let script = format!("5\n1\n{fill}\n7\n");
    menu_session(RAM_CLIENT, &["--capacity", "64"], &script)
        .success()
        .stdout(contains("Buffer size: 64 bytes"))
        .stdout(contains("Wrote 64 bytes"));
}

#[test]
fn seek_out_of_range_is_reported() {
    menu_session(RAM_CLIENT, &[], "3\n2000\n0\n7\n")
        .success()
        .stdout(contains("Seek failed: seek target outside the region"));
}

#[test]
fn reclaiming_gate_serves_the_same_menu() {
    menu_session(
        RAM_CLIENT,
        &["--gate", "reclaiming"],
        "1\nshared words\n3\n0\n0\n2\n12\n6\n7\n",
    )
    .success()
    .stdout(contains("Read: shared words"))
    .stdout(contains("Vowel count in buffer: 3"));
}
