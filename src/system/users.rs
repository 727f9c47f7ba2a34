use std::collections::HashMap;

/// Shown in place of a user name when the uid has no passwd entry.
pub const UNKNOWN_USER: &str = "N/A";

/// uid -> name lookup built from a passwd-format file.
#[derive(Clone, Debug, Default)]
pub struct UserDirectory {
    names: HashMap<u32, String>,
}

impl UserDirectory {
    pub fn parse(contents: &str) -> Self {
        let mut names = HashMap::new();
        for (name, uid) in passwd_entries(contents) {
            // First entry wins, matching a top-down scan.
            names.entry(uid).or_insert_with(|| name.to_string());
        }
        Self { names }
    }

    pub fn name_of(&self, uid: u32) -> Option<&str> {
        self.names.get(&uid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `(name, uid)` pairs from `name:passwd:uid:...` lines, skipping comments
/// and lines with a non-numeric uid.
pub fn passwd_entries(contents: &str) -> impl Iterator<Item = (&str, u32)> {
    contents.lines().filter_map(|line| {
        if line.starts_with('#') {
            return None;
        }
        let mut fields = line.split(':');
        let name = fields.next().filter(|n| !n.is_empty())?;
        let uid = fields.nth(1)?.trim().parse().ok()?;
        Some((name, uid))
    })
}

/// Linear scan for a single uid.
pub fn find_user_name(contents: &str, uid: u32) -> Option<String> {
    passwd_entries(contents)
        .find(|&(_, entry_uid)| entry_uid == uid)
        .map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash\n\
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin\n\
# comment:x:5:5\n\
broken-line\n\
alice:x:1000:1000:Alice,,,:/home/alice:/bin/bash\n\
shadowed:x:1000:1000::/home/s:/bin/sh\n";

    #[test]
    fn scan_finds_user() {
        assert_eq!(find_user_name(PASSWD, 0).as_deref(), Some("root"));
        assert_eq!(find_user_name(PASSWD, 1000).as_deref(), Some("alice"));
    }

    #[test]
    fn scan_unknown_uid_is_none() {
        assert_eq!(find_user_name(PASSWD, 4242), None);
        assert_eq!(find_user_name(PASSWD, 5), None);
        assert_eq!(find_user_name("", 0), None);
    }

    #[test]
    fn directory_matches_scan() {
        let dir = UserDirectory::parse(PASSWD);
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.name_of(1), Some("daemon"));
        assert_eq!(dir.name_of(1000), Some("alice"));
        assert_eq!(dir.name_of(7), None);
    }
}
