//! # Reversed-Build Bootstrap
//!
//! re3 and reVC compile the script variable accessor differently from the
//! retail executables, so scripts addressing globals through it land in
//! the wrong place. The accessor is overwritten once at startup with:
//!
//! ```text
//! 8B 44 24 04          mov  eax, [esp+4]
//! 8D 80 xx xx xx xx    lea  eax, [eax + script_space]
//! C3                   ret
//! ```

use scm_core::RawMemory;

use crate::error::RuntimeError;

/// Length of the patched accessor in bytes.
pub const PATCH_LEN: usize = 11;

/// `mov eax, [esp+4]` read as a little-endian word.
const MOV_EAX_ARG: u32 = 0x0424_448B;
/// `lea eax, [eax + disp32]` opcode and modrm, little-endian.
const LEA_EAX_DISP32: u16 = 0x808D;
/// `ret`
const RET: u8 = 0xC3;

/// Overwrites the accessor at `accessor` so it returns
/// `script_space + offset` for its argument.
///
/// # Errors
///
/// [`RuntimeError::ScriptSpaceOutOfRange`] if `script_space` does not fit
/// in the 32-bit displacement.
pub fn patch_script_var_accessor<M: RawMemory + ?Sized>(
    memory: &M,
    accessor: usize,
    script_space: usize,
) -> Result<(), RuntimeError> {
    let displacement =
        u32::try_from(script_space).map_err(|_| RuntimeError::ScriptSpaceOutOfRange(script_space))?;

    memory.write_u32(accessor, MOV_EAX_ARG, false);
    memory.write_u16(accessor + 4, LEA_EAX_DISP32, false);
    memory.write_u32(accessor + 6, displacement, false);
    memory.write_u8(accessor + 10, RET);

    tracing::info!(
        "patched script variable accessor at {:#x} (script space {:#x})",
        accessor,
        script_space
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scm_core::SimulatedMemory;

    #[test]
    fn test_patch_bytes() {
        let mem = SimulatedMemory::with_region(0x1000, 0x20);
        patch_script_var_accessor(&mem, 0x1004, 0x0074_B130).unwrap();

        let mut code = [0u8; PATCH_LEN];
        mem.read_bytes(0x1004, &mut code);
        assert_eq!(
            code,
            [0x8B, 0x44, 0x24, 0x04, 0x8D, 0x80, 0x30, 0xB1, 0x74, 0x00, 0xC3]
        );
        assert_eq!(mem.read_u8(0x1004 + PATCH_LEN), 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_script_space_must_fit_32_bits() {
        let mem = SimulatedMemory::with_region(0x1000, 0x20);
        assert_eq!(
            patch_script_var_accessor(&mem, 0x1000, 0x1_0000_0000),
            Err(RuntimeError::ScriptSpaceOutOfRange(0x1_0000_0000))
        );
        assert_eq!(mem.read_u8(0x1000), 0);
    }
}
