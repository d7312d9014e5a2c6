// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Define and validate the guestfs API table the generator walks.
// Author: Lukas Bower

use anyhow::{bail, Result};
use serde::Serialize;

/// Procedure number carried by calls that never traverse the wire.
pub const PROC_NONE: i32 = -1;

/// One typed argument of a call. At most three arguments per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arg {
    /// Non-null constant text.
    Str(&'static str),
    /// Text that may be absent.
    OptStr(&'static str),
    /// True or false.
    Bool(&'static str),
    /// Signed, at most 31 bits of magnitude; wired as 32-bit signed.
    Int(&'static str),
}

impl Arg {
    pub fn name(&self) -> &'static str {
        match *self {
            Arg::Str(n) | Arg::OptStr(n) | Arg::Bool(n) | Arg::Int(n) => n,
        }
    }
}

/// Return discipline of a call. Non-Err kinds carry the field name used when
/// the value is materialised into a wire struct, a binding record, or prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ret {
    /// Success or failure indication only.
    Err,
    /// Non-negative value on success, -1 on error.
    Int(&'static str),
    /// Boolean on success, -1 on error.
    Bool(&'static str),
    /// Text owned by the library. Forbidden on daemon calls: there is no
    /// thread-safe way to retain it between calls.
    ConstString(&'static str),
    /// Text owned by the caller.
    String(&'static str),
    /// Caller-owned, null-terminated array of text.
    StringList(&'static str),
    /// Pair of integer and boolean field names.
    IntBool(&'static str, &'static str),
    PvList(&'static str),
    VgList(&'static str),
    LvList(&'static str),
}

/// Optional annotations modulating the shell and documentation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flag {
    /// Append the 2-4 MiB message-size notice to the call's documentation.
    ProtocolLimitWarning,
    /// Extra name the shell accepts for this command.
    FishAlias(&'static str),
    /// Shell runner calls this builtin instead of the client API.
    FishAction(&'static str),
    /// Exclude the call from the shell dispatcher and the shell manual.
    NotInFish,
}

/// One entry in the API table.
#[derive(Debug, Clone, Serialize)]
pub struct Call {
    pub name: &'static str,
    pub ret: Ret,
    pub args: Vec<Arg>,
    /// Strictly positive and unique for daemon calls; PROC_NONE otherwise.
    pub proc_num: i32,
    pub flags: Vec<Flag>,
    /// One-line summary shown in tables and listings.
    pub summary: &'static str,
    /// POD prose. Must not end with a line terminator.
    pub description: &'static str,
}

impl Call {
    pub fn is_daemon(&self) -> bool {
        self.proc_num != PROC_NONE
    }

    pub fn fish_alias(&self) -> Option<&'static str> {
        self.flags.iter().find_map(|flag| match flag {
            Flag::FishAlias(alias) => Some(*alias),
            _ => None,
        })
    }

    pub fn fish_action(&self) -> Option<&'static str> {
        self.flags.iter().find_map(|flag| match flag {
            Flag::FishAction(action) => Some(*action),
            _ => None,
        })
    }

    pub fn in_fish(&self) -> bool {
        !self.flags.contains(&Flag::NotInFish)
    }

    pub fn protocol_limit_warning(&self) -> bool {
        self.flags.contains(&Flag::ProtocolLimitWarning)
    }

    /// Shell-facing spelling: underscores rewritten to hyphens.
    pub fn fish_name(&self) -> String {
        self.name.replace('_', "-")
    }

    /// Wire enum member, eg. GUESTFS_PROC_TOUCH.
    pub fn proc_const(&self) -> String {
        format!("GUESTFS_PROC_{}", self.name.to_uppercase())
    }
}

/// Column kinds of the structured LVM records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColKind {
    /// Null-terminated text.
    Str,
    /// Fixed 32 bytes, not null-terminated.
    Uuid,
    /// Unsigned 64-bit size in bytes.
    Bytes,
    /// Signed 64-bit integer.
    Int,
    /// Float in [0,100], or -1 meaning "not present".
    OptPercent,
}

/// Ordered field list of one LVM record kind. The column order is fixed: it
/// defines the wire layout, the public C struct layout, binding records, and
/// the tokenisation order of `lvm ... --separator ,` output.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSchema {
    /// Short kind tag: "pv", "vg" or "lv".
    pub kind: &'static str,
    pub cols: Vec<(&'static str, ColKind)>,
}

impl RecordSchema {
    /// Public struct name, eg. guestfs_lvm_pv.
    pub fn public_name(&self) -> String {
        format!("guestfs_lvm_{}", self.kind)
    }

    /// Wire struct name, eg. guestfs_lvm_int_pv.
    pub fn wire_name(&self) -> String {
        format!("guestfs_lvm_int_{}", self.kind)
    }

    /// Comma-joined column names handed to the lvm command line.
    pub fn col_spec(&self) -> String {
        self.cols
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The whole model: constructed once, immutable during emission.
#[derive(Debug, Serialize)]
pub struct ApiModel {
    pub calls: Vec<Call>,
    pub records: Vec<RecordSchema>,
}

impl ApiModel {
    pub fn builtin() -> Self {
        Self {
            calls: builtin_calls(),
            records: lvm_records(),
        }
    }

    pub fn daemon_calls(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter().filter(|call| call.is_daemon())
    }

    /// All calls, ordered alphabetically by public name.
    pub fn sorted_calls(&self) -> Vec<&Call> {
        let mut calls: Vec<&Call> = self.calls.iter().collect();
        calls.sort_by_key(|call| call.name);
        calls
    }

    /// Calls visible to the shell, ordered alphabetically by public name.
    pub fn fish_calls_sorted(&self) -> Vec<&Call> {
        let mut calls: Vec<&Call> = self.calls.iter().filter(|call| call.in_fish()).collect();
        calls.sort_by_key(|call| call.name);
        calls
    }

    pub fn record(&self, kind: &str) -> &RecordSchema {
        self.records
            .iter()
            .find(|record| record.kind == kind)
            .unwrap_or_else(|| panic!("no such record kind {kind}"))
    }

    /// Check every model invariant; the first violation aborts with a single
    /// diagnostic naming the offending call(s) and the rule broken. Nothing
    /// is emitted unless this returns Ok.
    pub fn validate(&self) -> Result<()> {
        for call in &self.calls {
            if call.name.contains('-') {
                bail!(
                    "call name '{}' contains a hyphen (use underscores)",
                    call.name
                );
            }
            if call.description.ends_with('\n') {
                bail!(
                    "long description of '{}' ends with a line terminator",
                    call.name
                );
            }
            if call.args.len() > 3 {
                bail!("call '{}' has more than three arguments", call.name);
            }
            if call.is_daemon() {
                if call.proc_num <= 0 {
                    bail!(
                        "daemon call '{}' must have a strictly positive procedure number, not {}",
                        call.name,
                        call.proc_num
                    );
                }
                if matches!(call.ret, Ret::ConstString(_)) {
                    bail!(
                        "daemon call '{}' may not return a const string (it cannot be retained across calls)",
                        call.name
                    );
                }
            }
        }

        let mut numbered: Vec<(&'static str, i32)> = self
            .daemon_calls()
            .map(|call| (call.name, call.proc_num))
            .collect();
        numbered.sort_by_key(|(_, num)| *num);
        for pair in numbered.windows(2) {
            if pair[0].1 == pair[1].1 {
                bail!(
                    "duplicate procedure number {} used by '{}' and '{}'",
                    pair[0].1,
                    pair[0].0,
                    pair[1].0
                );
            }
        }
        Ok(())
    }
}

fn call(
    name: &'static str,
    ret: Ret,
    args: &[Arg],
    proc_num: i32,
    flags: &[Flag],
    summary: &'static str,
    description: &'static str,
) -> Call {
    Call {
        name,
        ret,
        args: args.to_vec(),
        proc_num,
        flags: flags.to_vec(),
        summary,
        description,
    }
}

fn builtin_calls() -> Vec<Call> {
    vec![
        // Calls implemented entirely in the client library.
        call(
            "launch",
            Ret::Err,
            &[],
            PROC_NONE,
            &[Flag::FishAlias("run"), Flag::FishAction("launch")],
            "launch the qemu subprocess",
            "\
Internally libguestfs is implemented by running a virtual machine
using L<qemu(1)>.

You should call this after configuring the handle
(eg. adding drives) but before performing any actions.",
        ),
        call(
            "wait_ready",
            Ret::Err,
            &[],
            PROC_NONE,
            &[Flag::NotInFish],
            "wait until the qemu subprocess launches",
            "\
Internally libguestfs is implemented by running a virtual machine
using L<qemu(1)>.

You should call this after C<guestfs_launch> to wait for the launch
to complete.",
        ),
        call(
            "kill_subprocess",
            Ret::Err,
            &[],
            PROC_NONE,
            &[],
            "kill the qemu subprocess",
            "\
This kills the qemu subprocess.  You should never need to call this.",
        ),
        call(
            "add_drive",
            Ret::Err,
            &[Arg::Str("filename")],
            PROC_NONE,
            &[Flag::FishAlias("add")],
            "add an image to examine or modify",
            "\
This function adds a virtual machine disk image C<filename> to the
guest.  The first time you call this function, the disk appears as IDE
disk 0 (C</dev/sda>) in the guest, the second time as C</dev/sdb>, and
so on.

You don't necessarily need to be root when using libguestfs.  However
you obviously do need sufficient permissions to access the filename
for whatever operations you want to perform (ie. read access if you
just want to read the image or write access if you want to modify the
image).",
        ),
        call(
            "add_cdrom",
            Ret::Err,
            &[Arg::Str("filename")],
            PROC_NONE,
            &[Flag::FishAlias("cdrom")],
            "add a CD-ROM disk image to examine",
            "\
This function adds a virtual CD-ROM disk image to the guest.

This is equivalent to the qemu parameter C<-cdrom filename>.",
        ),
        call(
            "config",
            Ret::Err,
            &[Arg::Str("qemuparam"), Arg::OptStr("qemuvalue")],
            PROC_NONE,
            &[],
            "add qemu parameters",
            "\
This can be used to add arbitrary qemu command line parameters
of the form C<-param value>.  Actually it's not quite arbitrary - we
prevent you from setting some parameters which would interfere with
parameters that we use.

The first character of C<qemuparam> string must be a C<-> (dash).

C<qemuvalue> can be NULL.",
        ),
        call(
            "set_path",
            Ret::Err,
            &[Arg::Str("path")],
            PROC_NONE,
            &[Flag::FishAlias("path")],
            "set the search path",
            "\
Set the path that libguestfs searches for kernel and initrd.img.

The default is C<$libdir/guestfs> unless overridden by setting
C<LIBGUESTFS_PATH> environment variable.

The string C<path> is stashed in the libguestfs handle, so the caller
must make sure it remains valid for the lifetime of the handle.

Setting C<path> to C<NULL> restores the default path.",
        ),
        call(
            "get_path",
            Ret::ConstString("path"),
            &[],
            PROC_NONE,
            &[],
            "get the search path",
            "\
Return the current search path.

This is always non-NULL.  If it wasn't set already, then this will
return the default path.",
        ),
        call(
            "set_autosync",
            Ret::Err,
            &[Arg::Bool("autosync")],
            PROC_NONE,
            &[Flag::FishAlias("autosync")],
            "set autosync mode",
            "\
If C<autosync> is true, this enables autosync.  Libguestfs will make a
best effort attempt to run C<guestfs_sync> when the handle is closed
(also if the program exits without closing handles).",
        ),
        call(
            "get_autosync",
            Ret::Bool("autosync"),
            &[],
            PROC_NONE,
            &[],
            "get autosync mode",
            "\
Get the autosync flag.",
        ),
        call(
            "set_verbose",
            Ret::Err,
            &[Arg::Bool("verbose")],
            PROC_NONE,
            &[Flag::FishAlias("verbose")],
            "set verbose mode",
            "\
If C<verbose> is true, this turns on verbose messages (to C<stderr>).

Verbose messages are disabled unless the environment variable
C<LIBGUESTFS_DEBUG> is defined and set to C<1>.",
        ),
        call(
            "get_verbose",
            Ret::Bool("verbose"),
            &[],
            PROC_NONE,
            &[],
            "get verbose mode",
            "\
This returns the verbose messages flag.",
        ),
        // Calls implemented in the daemon, reached over the wire.
        call(
            "mount",
            Ret::Err,
            &[Arg::Str("device"), Arg::Str("mountpoint")],
            1,
            &[],
            "mount a guest disk at a position in the filesystem",
            "\
Mount a guest disk at a position in the filesystem.  Block devices
are named C</dev/sda>, C</dev/sdb> and so on, as they were added to
the guest.  If those block devices contain partitions, they will have
the usual names (eg. C</dev/sda1>).  Also LVM C</dev/VG/LV>-style
names can be used.

The rules are the same as for L<mount(2)>:  A filesystem must
first be mounted on C</> before others can be mounted.  Other
filesystems can only be mounted on directories which already
exist.",
        ),
        call(
            "sync",
            Ret::Err,
            &[],
            2,
            &[],
            "sync disks, writes are flushed to the disk image",
            "\
This syncs the disk, so that any writes are flushed through to the
underlying disk image.

You should always call this if you have modified a disk image, before
closing the handle.",
        ),
        call(
            "touch",
            Ret::Err,
            &[Arg::Str("path")],
            3,
            &[],
            "update file timestamps or create a new file",
            "\
Touch acts like the L<touch(1)> command.  It can be used to
update the timestamps on a file, or, if the file does not exist,
to create a new zero-length file.",
        ),
        call(
            "cat",
            Ret::String("content"),
            &[Arg::Str("path")],
            4,
            &[Flag::ProtocolLimitWarning],
            "list the contents of a file",
            "\
Return the contents of the file named C<path>.

Note that this function cannot correctly handle binary files
(specifically, files containing C<\\0> character which is treated
as end of string).",
        ),
        call(
            "ll",
            Ret::String("listing"),
            &[Arg::Str("directory")],
            5,
            &[],
            "list the files in a directory (long format)",
            "\
List the files in C<directory> (relative to the root directory,
there is no cwd) in the format of 'ls -la'.

This command is mostly useful for interactive sessions.  It
is I<not> intended that you try to parse the output string.",
        ),
        call(
            "ls",
            Ret::StringList("listing"),
            &[Arg::Str("directory")],
            6,
            &[],
            "list the files in a directory",
            "\
List the files in C<directory> (relative to the root directory,
there is no cwd).  The '.' and '..' entries are not returned, but
hidden files are shown.

This command is mostly useful for interactive sessions.",
        ),
        call(
            "list_devices",
            Ret::StringList("devices"),
            &[],
            7,
            &[],
            "list the block devices",
            "\
List all the block devices.

The full block device names are returned, eg. C</dev/sda>",
        ),
        call(
            "list_partitions",
            Ret::StringList("partitions"),
            &[],
            8,
            &[],
            "list the partitions",
            "\
List all the partitions detected on all block devices.

The full partition device names are returned, eg. C</dev/sda1>

This does not return logical volumes.  For that you will need to
call C<guestfs_lvs>.",
        ),
        call(
            "pvs",
            Ret::StringList("physvols"),
            &[],
            9,
            &[],
            "list the LVM physical volumes (PVs)",
            "\
List all the physical volumes detected.  This is the equivalent
of the L<pvs(8)> command.

This returns a list of just the device names that contain
PVs (eg. C</dev/sda2>).

See also C<guestfs_pvs_full>.",
        ),
        call(
            "vgs",
            Ret::StringList("volgroups"),
            &[],
            10,
            &[],
            "list the LVM volume groups (VGs)",
            "\
List all the volumes groups detected.  This is the equivalent
of the L<vgs(8)> command.

This returns a list of just the volume group names that were
detected (eg. C<VolGroup00>).

See also C<guestfs_vgs_full>.",
        ),
        call(
            "lvs",
            Ret::StringList("logvols"),
            &[],
            11,
            &[],
            "list the LVM logical volumes (LVs)",
            "\
List all the logical volumes detected.  This is the equivalent
of the L<lvs(8)> command.

This returns a list of the logical volume device names
(eg. C</dev/VolGroup00/LogVol00>).

See also C<guestfs_lvs_full>.",
        ),
        call(
            "pvs_full",
            Ret::PvList("physvols"),
            &[],
            12,
            &[],
            "list the LVM physical volumes (PVs)",
            "\
List all the physical volumes detected.  This is the equivalent
of the L<pvs(8)> command.  The \"full\" version includes all fields.",
        ),
        call(
            "vgs_full",
            Ret::VgList("volgroups"),
            &[],
            13,
            &[],
            "list the LVM volume groups (VGs)",
            "\
List all the volumes groups detected.  This is the equivalent
of the L<vgs(8)> command.  The \"full\" version includes all fields.",
        ),
        call(
            "lvs_full",
            Ret::LvList("logvols"),
            &[],
            14,
            &[],
            "list the LVM logical volumes (LVs)",
            "\
List all the logical volumes detected.  This is the equivalent
of the L<lvs(8)> command.  The \"full\" version includes all fields.",
        ),
        call(
            "read_lines",
            Ret::StringList("lines"),
            &[Arg::Str("path")],
            15,
            &[],
            "read file as lines",
            "\
Return the contents of the file named C<path>.

The file contents are returned as a list of lines.  Trailing
C<LF> and C<CRLF> character sequences are I<not> returned.

Note that this function cannot correctly handle binary files
(specifically, files containing C<\\0> character which is treated
as end of line).",
        ),
        call(
            "aug_init",
            Ret::Err,
            &[Arg::Str("root"), Arg::Int("flags")],
            16,
            &[],
            "create a new Augeas handle",
            "\
Create a new Augeas handle for editing configuration files.
If there was any previous Augeas handle associated with this
guestfs session, then it is closed.

You must call this before using any other C<guestfs_aug_*>
commands.

C<root> is the filesystem root.  C<root> must not be NULL,
use C</> instead.

The flags are the same as the flags defined in
E<lt>augeas.hE<gt>, the logical I<or> of the following
integers:

=over 4

=item C<AUG_SAVE_BACKUP> = 1

Keep the original file with a C<.augsave> extension.

=item C<AUG_SAVE_NEWFILE> = 2

Save changes into a file with extension C<.augnew>, and
do not overwrite original.  Overrides C<AUG_SAVE_BACKUP>.

=item C<AUG_TYPE_CHECK> = 4

Typecheck lenses (can be expensive).

=item C<AUG_NO_STDINC> = 8

Do not use standard load path for modules.

=item C<AUG_SAVE_NOOP> = 16

Make save a no-op, just record what would have been changed.

=item C<AUG_NO_LOAD> = 32

Do not load the tree in C<guestfs_aug_init>.

=back

To close the handle, you can call C<guestfs_aug_close>.

To find out more about Augeas, see L<http://augeas.net/>.",
        ),
        call(
            "aug_close",
            Ret::Err,
            &[],
            26,
            &[],
            "close the current Augeas handle",
            "\
Close the current Augeas handle and free up any resources
used by it.  After calling this, you have to call
C<guestfs_aug_init> again before you can use any other
Augeas functions.",
        ),
        call(
            "aug_defvar",
            Ret::Int("nrnodes"),
            &[Arg::Str("name"), Arg::OptStr("expr")],
            17,
            &[],
            "define an Augeas variable",
            "\
Defines an Augeas variable C<name> whose value is the result
of evaluating C<expr>.  If C<expr> is NULL, then C<name> is
undefined.

On success this returns the number of nodes in C<expr>, or
C<0> if C<expr> evaluates to something which is not a nodeset.",
        ),
        call(
            "aug_defnode",
            Ret::IntBool("nrnodes", "created"),
            &[Arg::Str("name"), Arg::Str("expr"), Arg::Str("val")],
            18,
            &[],
            "define an Augeas node",
            "\
Defines a variable C<name> whose value is the result of
evaluating C<expr>.

If C<expr> evaluates to an empty nodeset, a node is created,
equivalent to calling C<guestfs_aug_set> C<expr>, C<value>.
C<name> will be the nodeset containing that single node.

On success this returns a pair containing the
number of nodes in the nodeset, and a boolean flag
if a node was created.",
        ),
        call(
            "aug_get",
            Ret::String("val"),
            &[Arg::Str("path")],
            19,
            &[],
            "look up the value of an Augeas path",
            "\
Look up the value associated with C<path>.  If C<path>
matches exactly one node, the C<value> is returned.",
        ),
        call(
            "aug_set",
            Ret::Err,
            &[Arg::Str("path"), Arg::Str("val")],
            20,
            &[],
            "set Augeas path to value",
            "\
Set the value associated with C<path> to C<value>.",
        ),
        call(
            "aug_insert",
            Ret::Err,
            &[Arg::Str("path"), Arg::Str("label"), Arg::Bool("before")],
            21,
            &[],
            "insert a sibling Augeas node",
            "\
Create a new sibling C<label> for C<path>, inserting it into
the tree before or after C<path> (depending on the boolean
flag C<before>).

C<path> must match exactly one existing node in the tree, and
C<label> must be a label, ie. not contain C</>, C<*> or end
with a bracketed index C<[N]>.",
        ),
        call(
            "aug_rm",
            Ret::Int("nrnodes"),
            &[Arg::Str("path")],
            22,
            &[],
            "remove an Augeas path",
            "\
Remove C<path> and all of its children.

On success this returns the number of entries which were removed.",
        ),
        call(
            "aug_mv",
            Ret::Err,
            &[Arg::Str("src"), Arg::Str("dest")],
            23,
            &[],
            "move Augeas node",
            "\
Move the node C<src> to C<dest>.  C<src> must match exactly
one node.  C<dest> is overwritten if it exists.",
        ),
        call(
            "aug_match",
            Ret::StringList("matches"),
            &[Arg::Str("path")],
            24,
            &[],
            "return Augeas nodes which match path",
            "\
Returns a list of paths which match the path expression C<path>.
The returned paths are sufficiently qualified so that they match
exactly one node in the current tree.",
        ),
        call(
            "aug_save",
            Ret::Err,
            &[],
            25,
            &[],
            "write all pending Augeas changes to disk",
            "\
This writes all pending changes to disk.

The flags which were passed to C<guestfs_aug_init> affect exactly
how files are saved.",
        ),
        call(
            "aug_load",
            Ret::Err,
            &[],
            27,
            &[],
            "load files into the tree",
            "\
Load files into the tree.

See C<aug_load> in the Augeas documentation for the full gory
details.",
        ),
        call(
            "aug_ls",
            Ret::StringList("matches"),
            &[Arg::Str("path")],
            28,
            &[],
            "list Augeas nodes under a path",
            "\
This is just a shortcut for listing C<guestfs_aug_match>
C<path/*> and sorting the resulting nodes into alphabetical order.",
        ),
        call(
            "rm",
            Ret::Err,
            &[Arg::Str("path")],
            29,
            &[],
            "remove a file",
            "\
Remove the single file C<path>.",
        ),
        call(
            "rmdir",
            Ret::Err,
            &[Arg::Str("path")],
            30,
            &[],
            "remove a directory",
            "\
Remove the single directory C<path>.",
        ),
        call(
            "rm_rf",
            Ret::Err,
            &[Arg::Str("path")],
            31,
            &[],
            "remove a file or directory recursively",
            "\
Remove the file or directory C<path>, recursively removing the
contents if its a directory.  This is like the C<rm -rf> shell
command.",
        ),
        call(
            "mkdir",
            Ret::Err,
            &[Arg::Str("path")],
            32,
            &[],
            "create a directory",
            "\
Create a directory named C<path>.",
        ),
        call(
            "mkdir_p",
            Ret::Err,
            &[Arg::Str("path")],
            33,
            &[],
            "create a directory and parents",
            "\
Create a directory named C<path>, creating any parent directories
as necessary.  This is like the C<mkdir -p> shell command.",
        ),
        call(
            "chmod",
            Ret::Err,
            &[Arg::Int("mode"), Arg::Str("path")],
            34,
            &[],
            "change file mode",
            "\
Change the mode (permissions) of C<path> to C<mode>.  Only
numeric modes are supported.",
        ),
        call(
            "chown",
            Ret::Err,
            &[Arg::Int("owner"), Arg::Int("group"), Arg::Str("path")],
            35,
            &[],
            "change file owner and group",
            "\
Change the file owner to C<owner> and group to C<group>.

Only numeric uid and gid are supported.  If you want to use
names, you will need to locate and parse the password file
yourself (Augeas support makes this relatively easy).",
        ),
        call(
            "exists",
            Ret::Bool("existsflag"),
            &[Arg::Str("path")],
            36,
            &[],
            "test if file or directory exists",
            "\
This returns C<true> if and only if there is a file, directory
(or anything) with the given C<path> name.

See also C<guestfs_is_file>, C<guestfs_is_dir>.",
        ),
        call(
            "is_file",
            Ret::Bool("fileflag"),
            &[Arg::Str("path")],
            37,
            &[],
            "test if file exists",
            "\
This returns C<true> if and only if there is a file
with the given C<path> name.  Note that it returns false for
other objects like directories.

See also C<guestfs_exists>.",
        ),
        call(
            "is_dir",
            Ret::Bool("dirflag"),
            &[Arg::Str("path")],
            38,
            &[],
            "test if a directory",
            "\
This returns C<true> if and only if there is a directory
with the given C<path> name.  Note that it returns false for
other objects like files.

See also C<guestfs_exists>.",
        ),
    ]
}

fn lvm_records() -> Vec<RecordSchema> {
    vec![
        RecordSchema {
            kind: "pv",
            cols: vec![
                ("pv_name", ColKind::Str),
                ("pv_uuid", ColKind::Uuid),
                ("pv_fmt", ColKind::Str),
                ("pv_size", ColKind::Bytes),
                ("dev_size", ColKind::Bytes),
                ("pv_free", ColKind::Bytes),
                ("pv_used", ColKind::Bytes),
                ("pv_attr", ColKind::Str),
                ("pv_pe_count", ColKind::Int),
                ("pv_pe_alloc_count", ColKind::Int),
                ("pv_tags", ColKind::Str),
                ("pe_start", ColKind::Bytes),
                ("pv_mda_count", ColKind::Int),
                ("pv_mda_free", ColKind::Bytes),
            ],
        },
        RecordSchema {
            kind: "vg",
            cols: vec![
                ("vg_name", ColKind::Str),
                ("vg_uuid", ColKind::Uuid),
                ("vg_fmt", ColKind::Str),
                ("vg_attr", ColKind::Str),
                ("vg_size", ColKind::Bytes),
                ("vg_free", ColKind::Bytes),
                ("vg_sysid", ColKind::Str),
                ("vg_extent_size", ColKind::Bytes),
                ("vg_extent_count", ColKind::Int),
                ("vg_free_count", ColKind::Int),
                ("max_lv", ColKind::Int),
                ("max_pv", ColKind::Int),
                ("pv_count", ColKind::Int),
                ("lv_count", ColKind::Int),
                ("snap_count", ColKind::Int),
                ("vg_seqno", ColKind::Int),
                ("vg_tags", ColKind::Str),
                ("vg_mda_count", ColKind::Int),
                ("vg_mda_free", ColKind::Bytes),
            ],
        },
        RecordSchema {
            kind: "lv",
            cols: vec![
                ("lv_name", ColKind::Str),
                ("lv_uuid", ColKind::Uuid),
                ("lv_attr", ColKind::Str),
                ("lv_major", ColKind::Int),
                ("lv_minor", ColKind::Int),
                ("kernel_major", ColKind::Int),
                ("kernel_minor", ColKind::Int),
                ("lv_size", ColKind::Bytes),
                ("seg_count", ColKind::Int),
                ("origin", ColKind::Str),
                ("snap_percent", ColKind::OptPercent),
                ("copy_percent", ColKind::OptPercent),
                ("move_pv", ColKind::Str),
                ("lv_tags", ColKind::Str),
                ("mirror_log", ColKind::Str),
                ("modules", ColKind::Str),
            ],
        },
    ]
}
