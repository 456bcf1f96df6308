use kernel_qemu::{ByteSource, LineEditor};

/// Yields scripted bytes, then reports the input as closed forever.
struct Keyboard {
    keys: Vec<u8>,
    pos: usize,
    reads_after_close: usize,
}

impl Keyboard {
    fn new(keys: &str) -> Self {
        Self {
            keys: keys.as_bytes().to_vec(),
            pos: 0,
            reads_after_close: 0,
        }
    }
}

impl ByteSource for Keyboard {
    fn read_byte(&mut self) -> Option<u8> {
        let b = self.keys.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        } else {
            self.reads_after_close += 1;
        }
        b
    }
}

#[test]
fn editor_state_carries_across_lines() {
    let mut keys = Keyboard::new("sm f0000000 f0001000\r\nbt\r\n");
    let mut echo = String::new();
    let mut editor = LineEditor::new();
    let mut buf = [0u8; 80];

    assert_eq!(
        editor.read_line(&mut keys, &mut echo, &mut buf),
        Some("sm f0000000 f0001000")
    );
    assert_eq!(editor.read_line(&mut keys, &mut echo, &mut buf), Some("bt"));
    assert_eq!(editor.read_line(&mut keys, &mut echo, &mut buf), None);
    assert_eq!(keys.reads_after_close, 1);
    assert_eq!(echo, "sm f0000000 f0001000\nbt\n");
}
