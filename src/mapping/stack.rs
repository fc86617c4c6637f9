use log::trace;

use crate::{
    dispatch::RealmTable,
    mapping::{MappingFrame, MappingRow, MappingTable},
    model::MemberLocation,
    Error, Result,
};

/// A stack of [`MappingFrame`]s supporting speculative writes.
///
/// Frame 0 is the base frame and collects every committed mapping. Frames above it are
/// speculative: a candidate match writes into the innermost frame, which is merged into its
/// parent once the match is confirmed or discarded otherwise.
///
/// Lookups consult every active frame. A key is written into at most one active frame at a time;
/// should it be defined more than once, the outermost definition wins.
///
/// Method keys are normalized to the declaring class of their [`crate::dispatch::MethodRealm`],
/// so that all overrides of a method share one mapping. Methods without a realm, which are those
/// declared outside the program model, keep their literal owner.
///
/// # Example
///
/// ```rust
/// use softmap::dispatch::RealmTable;
/// use softmap::mapping::FrameStack;
///
/// let realms = RealmTable::default();
/// let mut stack = FrameStack::new(&realms);
/// stack.push();
///
/// stack.push();
/// stack.map_class("a", "Foo")?;
/// assert_eq!(stack.lookup_class("a"), Some("Foo"));
/// stack.discard()?;
/// assert_eq!(stack.lookup_class("a"), None);
/// # Ok::<(), softmap::Error>(())
/// ```
#[derive(Debug)]
pub struct FrameStack<'r> {
    frames: Vec<MappingFrame>,
    realms: &'r RealmTable,
}

impl<'r> FrameStack<'r> {
    /// Creates a stack without frames, resolving method keys through `realms`.
    #[must_use]
    pub fn new(realms: &'r RealmTable) -> Self {
        Self {
            frames: Vec::new(),
            realms,
        }
    }

    /// The realm table used for method key normalization.
    #[must_use]
    pub fn realms(&self) -> &'r RealmTable {
        self.realms
    }

    /// Number of active frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Verifies the number of active frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameStack`] if the depth differs.
    pub fn expect_depth(&self, expected: usize) -> Result<()> {
        if self.frames.len() == expected {
            Ok(())
        } else {
            Err(frame_error!(
                "expected {} active frame(s), found {}",
                expected,
                self.frames.len()
            ))
        }
    }

    /// Opens a new empty innermost frame.
    pub fn push(&mut self) {
        self.frames.push(MappingFrame::new());
    }

    /// Reattaches a frame previously detached with [`FrameStack::pop`].
    pub fn push_frame(&mut self, frame: MappingFrame) {
        self.frames.push(frame);
    }

    /// Detaches and returns the innermost frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameStack`] if no frame is active.
    pub fn pop(&mut self) -> Result<MappingFrame> {
        self.frames
            .pop()
            .ok_or_else(|| frame_error!("cannot pop from an empty frame stack"))
    }

    /// Drops the innermost frame with all of its mappings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameStack`] if no frame is active.
    pub fn discard(&mut self) -> Result<()> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| frame_error!("cannot discard from an empty frame stack"))?;
        if !frame.is_empty() {
            trace!("discarding {} speculative mapping(s)", frame.len());
        }
        Ok(())
    }

    /// Folds the innermost frame into its parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameStack`] if fewer than two frames are active.
    pub fn merge(&mut self) -> Result<()> {
        if self.frames.len() < 2 {
            return Err(frame_error!(
                "merging requires at least 2 active frames, found {}",
                self.frames.len()
            ));
        }

        if let Some(inner) = self.frames.pop() {
            if let Some(parent) = self.frames.last_mut() {
                parent.absorb(inner);
            }
        }
        Ok(())
    }

    /// The base frame, if one is active.
    #[must_use]
    pub fn base(&self) -> Option<&MappingFrame> {
        self.frames.first()
    }

    /// The key a method mapping is stored under: the location on the realm's declaring class.
    #[must_use]
    pub fn method_key(&self, owner: &str, name: &str, desc: &str) -> MemberLocation {
        match self.realms.lookup(owner, name, desc) {
            Some(realm) => realm.declaring_location(),
            None => MemberLocation::new(owner, name, desc),
        }
    }

    fn lookup<'s>(&'s self, get: impl Fn(&'s MappingFrame) -> Option<&'s str>) -> Option<&'s str> {
        let mut defined = self.frames.iter().filter_map(get);
        let first = defined.next();
        debug_assert!(
            defined.next().is_none(),
            "mapping key is defined in more than one active frame"
        );
        first
    }

    /// Destination name of a class, `None` while unmapped.
    #[must_use]
    pub fn lookup_class(&self, src: &str) -> Option<&str> {
        self.lookup(|frame| frame.class(src))
    }

    /// Destination name of a field, `None` while unmapped.
    #[must_use]
    pub fn lookup_field(&self, owner: &str, name: &str, desc: &str) -> Option<&str> {
        let key = MemberLocation::new(owner, name, desc);
        self.lookup(|frame| frame.field(&key))
    }

    /// Destination name of a method, `None` while unmapped.
    ///
    /// Overrides share their mapping: the lookup goes through the realm's declaring class.
    #[must_use]
    pub fn lookup_method(&self, owner: &str, name: &str, desc: &str) -> Option<&str> {
        let key = self.method_key(owner, name, desc);
        self.lookup(|frame| frame.method(&key))
    }

    fn innermost(&mut self) -> Result<&mut MappingFrame> {
        self.frames.last_mut().ok_or(Error::NoActiveFrame)
    }

    /// Records a class mapping in the innermost frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalClassName`] if `src` is a descriptor rather than an internal name,
    /// and [`Error::NoActiveFrame`] if no frame is active.
    pub fn map_class(&mut self, src: &str, dst: &str) -> Result<()> {
        if src.starts_with('[') || src.ends_with(';') {
            return Err(Error::IllegalClassName(src.to_string()));
        }

        trace!("class {src} -> {dst}");
        self.innermost()?
            .insert_class(src.to_string(), dst.to_string());
        Ok(())
    }

    /// Records a field mapping in the innermost frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveFrame`] if no frame is active.
    pub fn map_field(&mut self, owner: &str, name: &str, desc: &str, dst: &str) -> Result<()> {
        trace!("field {owner}.{name} {desc} -> {dst}");
        self.innermost()?
            .insert_field(MemberLocation::new(owner, name, desc), dst.to_string());
        Ok(())
    }

    /// Records a method mapping in the innermost frame, keyed by the realm's declaring class.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveFrame`] if no frame is active.
    pub fn map_method(&mut self, owner: &str, name: &str, desc: &str, dst: &str) -> Result<()> {
        let key = self.method_key(owner, name, desc);
        trace!("method {key} -> {dst}");
        self.innermost()?.insert_method(key, dst.to_string());
        Ok(())
    }

    /// Renders the mappings of all active frames as a renaming table.
    ///
    /// Each method mapping yields one row per realm member when `expand_realm_members` is set,
    /// otherwise a single row for the declaring class.
    #[must_use]
    pub fn export(&self, expand_realm_members: bool) -> MappingTable {
        let mut merged = MappingFrame::new();
        for frame in &self.frames {
            merged.absorb(frame.clone());
        }

        let mut rows = Vec::with_capacity(merged.len());
        rows.extend(merged.classes().map(|(src, dst)| MappingRow::Class {
            src: src.to_string(),
            dst: dst.to_string(),
        }));
        rows.extend(merged.fields().map(|(key, dst)| MappingRow::Field {
            owner: key.owner.clone(),
            desc: key.desc.clone(),
            name: key.name.clone(),
            dst: dst.to_string(),
        }));

        for (key, dst) in merged.methods() {
            let method_row = |owner: &str| MappingRow::Method {
                owner: owner.to_string(),
                desc: key.desc.clone(),
                name: key.name.clone(),
                dst: dst.to_string(),
            };

            match self.realms.get(key) {
                Some(realm) if expand_realm_members => {
                    rows.extend(realm.members.iter().map(|member| method_row(member)));
                }
                _ => rows.push(method_row(&key.owner)),
            }
        }

        MappingTable::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{AccessFlags, ProgramModel},
        test::{class, method},
    };

    fn hierarchy() -> RealmTable {
        RealmTable::build(&ProgramModel::new(vec![
            class("a/A").with_method(method("m", "()V", AccessFlags::PUBLIC)),
            class("a/B").with_super("a/A"),
        ]))
    }

    #[test]
    fn merge_and_discard() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.push();
        stack.map_class("a", "A").unwrap();
        stack.merge().unwrap();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.lookup_class("a"), Some("A"));

        stack.push();
        stack.map_class("b", "B").unwrap();
        stack.discard().unwrap();
        assert_eq!(stack.lookup_class("b"), None);
        assert_eq!(stack.base().map(MappingFrame::len), Some(1));
    }

    #[test]
    fn pop_and_reattach() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.push();
        stack.push();
        stack.map_field("a", "f", "I", "count").unwrap();

        let winner = stack.pop().unwrap();
        stack.discard().unwrap();
        stack.push_frame(winner);
        stack.expect_depth(2).unwrap();
        assert_eq!(stack.lookup_field("a", "f", "I"), Some("count"));
        stack.merge().unwrap();
        assert_eq!(stack.lookup_field("a", "f", "I"), Some("count"));
    }

    #[test]
    fn depth_violations() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        assert!(matches!(stack.pop(), Err(Error::FrameStack { .. })));
        assert!(matches!(stack.discard(), Err(Error::FrameStack { .. })));
        assert!(matches!(stack.map_class("a", "b"), Err(Error::NoActiveFrame)));

        stack.push();
        assert!(matches!(stack.merge(), Err(Error::FrameStack { .. })));
        assert!(stack.expect_depth(1).is_ok());
        assert!(matches!(stack.expect_depth(2), Err(Error::FrameStack { .. })));
    }

    #[test]
    fn descriptor_class_names_are_rejected() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        assert!(matches!(
            stack.map_class("La/b;", "c"),
            Err(Error::IllegalClassName(name)) if name == "La/b;"
        ));
        assert!(matches!(stack.map_class("[I", "c"), Err(Error::IllegalClassName(_))));
    }

    #[test]
    fn methods_share_mapping_through_realm() {
        let realms = hierarchy();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.map_method("a/B", "m", "()V", "run").unwrap();

        assert_eq!(stack.lookup_method("a/A", "m", "()V"), Some("run"));
        assert_eq!(stack.lookup_method("a/B", "m", "()V"), Some("run"));
        assert_eq!(
            stack.method_key("a/B", "m", "()V"),
            MemberLocation::new("a/A", "m", "()V")
        );

        let table = stack.export(true);
        let rows: Vec<_> = table.iter().map(ToString::to_string).collect();
        assert_eq!(rows, ["METHOD\ta/A\t()V\tm\trun", "METHOD\ta/B\t()V\tm\trun"]);

        let table = stack.export(false);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn external_methods_keep_their_owner() {
        let realms = hierarchy();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.map_method("java/io/PrintStream", "a", "(I)V", "println").unwrap();
        assert_eq!(
            stack.export(true).to_string(),
            "METHOD\tjava/io/PrintStream\t(I)V\ta\tprintln\n"
        );
    }

    #[test]
    fn export_orders_classes_fields_methods() {
        let realms = RealmTable::default();
        let mut stack = FrameStack::new(&realms);
        stack.push();
        stack.map_method("z", "m", "()V", "run").unwrap();
        stack.push();
        stack.map_field("y", "f", "I", "count").unwrap();
        stack.map_class("x", "X").unwrap();

        let kinds: Vec<_> = stack
            .export(true)
            .iter()
            .map(|row| match row {
                MappingRow::Class { .. } => "class",
                MappingRow::Field { .. } => "field",
                MappingRow::Method { .. } => "method",
            })
            .collect();
        assert_eq!(kinds, ["class", "field", "method"]);
    }
}
