//! Key codes recorded in input records, and their names.
//!
//! The table is plain data, kept apart from any enum so that lookups in both
//! directions share one source. Several names exist for some codes (`y` is
//! both the north-west step and "yes"); the first entry for a code is its
//! display name.

/// Meta (Alt) modifier.
const fn meta(c: u8) -> u8 {
    c | 0x80
}

/// Control modifier.
const fn ctrl(c: u8) -> u8 {
    c & 0x1f
}

/// Action names and the key codes that trigger them.
pub const ACTIONS: &[(&str, u8)] = &[
    // compass directions
    ("N", b'k'),
    ("E", b'l'),
    ("S", b'j'),
    ("W", b'h'),
    ("NE", b'u'),
    ("SE", b'n'),
    ("SW", b'b'),
    ("NW", b'y'),
    ("N_LONG", b'K'),
    ("E_LONG", b'L'),
    ("S_LONG", b'J'),
    ("W_LONG", b'H'),
    ("NE_LONG", b'U'),
    ("SE_LONG", b'N'),
    ("SW_LONG", b'B'),
    ("NW_LONG", b'Y'),
    ("UP", b'<'),
    ("DOWN", b'>'),
    ("WAIT", b'.'),
    // prompts
    ("MORE", b'\r'),
    ("ESC", 27),
    ("SPACE", b' '),
    ("YES", b'y'),
    ("NO", b'n'),
    // commands
    ("EXTCMD", b'#'),
    ("ADJUST", meta(b'a')),
    ("APPLY", b'a'),
    ("ATTRIBUTES", ctrl(b'x')),
    ("AUTOPICKUP", b'@'),
    ("CALL", b'C'),
    ("CAST", b'Z'),
    ("CHAT", meta(b'c')),
    ("CLOSE", b'c'),
    ("DIP", meta(b'd')),
    ("DROP", b'd'),
    ("DROPTYPE", b'D'),
    ("EAT", b'e'),
    ("ENGRAVE", b'E'),
    ("ENHANCE", meta(b'e')),
    ("FIGHT", b'F'),
    ("FIRE", b'f'),
    ("FORCE", meta(b'f')),
    ("GLANCE", b';'),
    ("HISTORY", b'V'),
    ("INVENTORY", b'i'),
    ("INVENTTYPE", b'I'),
    ("INVOKE", meta(b'i')),
    ("JUMP", meta(b'j')),
    ("KICK", ctrl(b'd')),
    ("LOOK", b':'),
    ("LOOT", meta(b'l')),
    ("MONSTER", meta(b'm')),
    ("MOVE", b'm'),
    ("MOVEFAR", b'M'),
    ("OFFER", meta(b'o')),
    ("OPEN", b'o'),
    ("OPTIONS", b'O'),
    ("OVERVIEW", ctrl(b'o')),
    ("PAY", b'p'),
    ("PICKUP", b','),
    ("PRAY", meta(b'p')),
    ("PREVMSG", ctrl(b'p')),
    ("PUTON", b'P'),
    ("QUAFF", b'q'),
    ("QUIT", meta(b'q')),
    ("QUIVER", b'Q'),
    ("READ", b'r'),
    ("REDRAW", ctrl(b'r')),
    ("REMOVE", b'R'),
    ("RIDE", meta(b'R')),
    ("RUB", meta(b'r')),
    ("RUSH", b'g'),
    ("SAVE", b'S'),
    ("SEARCH", b's'),
    ("SEEALL", b'*'),
    ("SEETRAP", b'^'),
    ("SIT", meta(b's')),
    ("SWAP", b'x'),
    ("TAKEOFF", b'T'),
    ("TAKEOFFALL", b'A'),
    ("TELEPORT", ctrl(b't')),
    ("THROW", b't'),
    ("TIP", meta(b'T')),
    ("TRAVEL", b'_'),
    ("TURN", meta(b't')),
    ("TWOWEAPON", b'X'),
    ("UNTRAP", meta(b'u')),
    ("VERSION", meta(b'v')),
    ("VERSIONSHORT", b'v'),
    ("WEAR", b'W'),
    ("WHATDOES", b'&'),
    ("WHATIS", b'/'),
    ("WIELD", b'w'),
    ("WIPE", meta(b'w')),
    ("ZAP", b'z'),
];

/// Display name of a key code.
pub fn name_of(code: u8) -> Option<&'static str> {
    ACTIONS
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

/// Key code of an action name, ignoring case.
pub fn code_of(name: &str) -> Option<u8> {
    ACTIONS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// Display name of a key code, falling back to the code itself.
pub fn describe(code: u8) -> String {
    match name_of(code) {
        Some(name) => name.to_string(),
        None if code == 0 => "none".to_string(),
        None if code.is_ascii_graphic() => format!("'{}'", code as char),
        None => format!("0x{:02x}", code),
    }
}
