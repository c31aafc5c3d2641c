//! Control and Status Register (CSR) address decoding.
//!
//! This module implements the CSR address decoder for the RV32 core. It provides:
//! 1. **Address Definitions:** Constants for every CSR the core implements.
//! 2. **Field Masks:** Bit positions in `mstatus`, `mie` and `mip` used by trap arbitration.
//! 3. **Selection:** Mapping a 12-bit address to a `CsrSelect` and its feature group.
//! 4. **Access Legality:** The structural read-only / minimum-privilege rule and group gating.
//!
//! Storage and read-modify-write of CSR values live outside this core.

use serde::Serialize;
use tracing::trace;

use crate::config::CoreConfig;
use crate::core::arch::mode::PrivilegeMode;

/// Mask of the 12-bit CSR address space.
pub const CSR_ADDRESS_MASK: u16 = 0xFFF;

/// User status register CSR address.
pub const USTATUS: u16 = 0x000;
/// User interrupt enable register CSR address.
pub const UIE: u16 = 0x004;
/// User trap vector CSR address.
pub const UTVEC: u16 = 0x005;
/// User scratch register CSR address.
pub const USCRATCH: u16 = 0x040;
/// User exception program counter CSR address.
pub const UEPC: u16 = 0x041;
/// User cause register CSR address.
pub const UCAUSE: u16 = 0x042;
/// User trap value register CSR address.
pub const UTVAL: u16 = 0x043;
/// User interrupt pending register CSR address.
pub const UIP: u16 = 0x044;

/// Cycle counter CSR address (read-only, user mode accessible).
pub const CYCLE: u16 = 0xC00;
/// Real-time counter CSR address (read-only, user mode accessible).
pub const TIME: u16 = 0xC01;
/// Instructions retired counter CSR address (read-only, user mode accessible).
pub const INSTRET: u16 = 0xC02;
/// Upper half of `cycle`.
pub const CYCLEH: u16 = 0xC80;
/// Upper half of `time`.
pub const TIMEH: u16 = 0xC81;
/// Upper half of `instret`.
pub const INSTRETH: u16 = 0xC82;

/// Machine vendor ID CSR address.
pub const MVENDORID: u16 = 0xF11;
/// Machine architecture ID CSR address.
pub const MARCHID: u16 = 0xF12;
/// Machine implementation ID CSR address.
pub const MIMPID: u16 = 0xF13;
/// Machine hardware thread ID CSR address.
pub const MHARTID: u16 = 0xF14;

/// Machine status register CSR address.
pub const MSTATUS: u16 = 0x300;
/// Machine ISA register CSR address.
pub const MISA: u16 = 0x301;
/// Machine exception delegation register CSR address.
pub const MEDELEG: u16 = 0x302;
/// Machine interrupt delegation register CSR address.
pub const MIDELEG: u16 = 0x303;
/// Machine interrupt enable register CSR address.
pub const MIE: u16 = 0x304;
/// Machine trap vector base address register CSR address.
pub const MTVEC: u16 = 0x305;
/// Machine counter enable register CSR address.
pub const MCOUNTEREN: u16 = 0x306;

/// Machine scratch register CSR address.
pub const MSCRATCH: u16 = 0x340;
/// Machine exception program counter CSR address.
pub const MEPC: u16 = 0x341;
/// Machine cause register CSR address.
pub const MCAUSE: u16 = 0x342;
/// Machine trap value register CSR address.
pub const MTVAL: u16 = 0x343;
/// Machine interrupt pending register CSR address.
pub const MIP: u16 = 0x344;

/// Machine cycle counter CSR address.
pub const MCYCLE: u16 = 0xB00;
/// Machine instructions retired counter CSR address.
pub const MINSTRET: u16 = 0xB02;
/// Upper half of `mcycle`.
pub const MCYCLEH: u16 = 0xB80;
/// Upper half of `minstret`.
pub const MINSTRETH: u16 = 0xB82;

/// Debug control and status CSR address.
pub const DCSR: u16 = 0x7B0;
/// Debug program counter CSR address.
pub const DPC: u16 = 0x7B1;
/// Debug scratch register 0 CSR address.
pub const DSCRATCH0: u16 = 0x7B2;
/// Debug scratch register 1 CSR address.
pub const DSCRATCH1: u16 = 0x7B3;

/// User interrupt enable bit in `mstatus` register.
pub const MSTATUS_UIE: u32 = 1 << 0;
/// Machine interrupt enable bit in `mstatus` register.
pub const MSTATUS_MIE: u32 = 1 << 3;

/// User software interrupt bit in `mie` / `mip` / `mideleg`.
pub const MIP_USIP: u32 = 1 << 0;
/// Machine software interrupt bit in `mie` / `mip`.
pub const MIP_MSIP: u32 = 1 << 3;
/// User timer interrupt bit in `mie` / `mip` / `mideleg`.
pub const MIP_UTIP: u32 = 1 << 4;
/// Machine timer interrupt bit in `mie` / `mip`.
pub const MIP_MTIP: u32 = 1 << 7;
/// User external interrupt bit in `mie` / `mip` / `mideleg`.
pub const MIP_UEIP: u32 = 1 << 8;
/// Machine external interrupt bit in `mie` / `mip`.
pub const MIP_MEIP: u32 = 1 << 11;

/// Address bits 11:10 value marking a read-only CSR.
const READ_ONLY_CLASS: u16 = 0b11;

/// Kind of access a CSR instruction performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrAccessKind {
    /// No access.
    #[default]
    None,
    /// Read only (CSRRS/CSRRC with a zero source).
    Read,
    /// Write without read (CSRRW with rd = x0).
    Write,
    /// Swap (CSRRW with rd != x0).
    ReadWrite,
    /// Read then set bits.
    ReadSet,
    /// Read then clear bits.
    ReadClear,
}

impl CsrAccessKind {
    /// Returns true if the access reads the CSR.
    pub const fn reads(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite | Self::ReadSet | Self::ReadClear)
    }

    /// Returns true if the access modifies the CSR.
    pub const fn writes(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite | Self::ReadSet | Self::ReadClear)
    }
}

/// Feature group a CSR belongs to; each group may be compiled out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CsrGroup {
    /// Always present.
    Base,
    /// User-level trap CSRs and machine delegation registers.
    UserInterrupts,
    /// Counter enable, present with user mode.
    UserMode,
    /// Debug CSRs, present with debug mode and only accessible in it.
    Debug,
}

impl CsrGroup {
    /// Whether CSRs of this group are accessible in `mode` under `config`.
    pub const fn enabled(self, mode: PrivilegeMode, config: &CoreConfig) -> bool {
        match self {
            Self::Base => true,
            Self::UserInterrupts => config.user_interrupts,
            Self::UserMode => config.user_mode,
            Self::Debug => config.debug_enabled() && matches!(mode, PrivilegeMode::Debug),
        }
    }
}

/// The CSR an address selects, or `None` for unmapped addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum CsrSelect {
    #[default]
    None,
    Ustatus,
    Uie,
    Utvec,
    Uscratch,
    Uepc,
    Ucause,
    Utval,
    Uip,
    Cycle,
    Time,
    Instret,
    Cycleh,
    Timeh,
    Instreth,
    Mvendorid,
    Marchid,
    Mimpid,
    Mhartid,
    Mstatus,
    Misa,
    Medeleg,
    Mideleg,
    Mie,
    Mtvec,
    Mcounteren,
    Mscratch,
    Mepc,
    Mcause,
    Mtval,
    Mip,
    Mcycle,
    Minstret,
    Mcycleh,
    Minstreth,
    Dcsr,
    Dpc,
    Dscratch0,
    Dscratch1,
}

impl CsrSelect {
    /// Looks up the CSR at a 12-bit address.
    pub const fn from_address(address: u16) -> Self {
        match address & CSR_ADDRESS_MASK {
            USTATUS => Self::Ustatus,
            UIE => Self::Uie,
            UTVEC => Self::Utvec,
            USCRATCH => Self::Uscratch,
            UEPC => Self::Uepc,
            UCAUSE => Self::Ucause,
            UTVAL => Self::Utval,
            UIP => Self::Uip,
            CYCLE => Self::Cycle,
            TIME => Self::Time,
            INSTRET => Self::Instret,
            CYCLEH => Self::Cycleh,
            TIMEH => Self::Timeh,
            INSTRETH => Self::Instreth,
            MVENDORID => Self::Mvendorid,
            MARCHID => Self::Marchid,
            MIMPID => Self::Mimpid,
            MHARTID => Self::Mhartid,
            MSTATUS => Self::Mstatus,
            MISA => Self::Misa,
            MEDELEG => Self::Medeleg,
            MIDELEG => Self::Mideleg,
            MIE => Self::Mie,
            MTVEC => Self::Mtvec,
            MCOUNTEREN => Self::Mcounteren,
            MSCRATCH => Self::Mscratch,
            MEPC => Self::Mepc,
            MCAUSE => Self::Mcause,
            MTVAL => Self::Mtval,
            MIP => Self::Mip,
            MCYCLE => Self::Mcycle,
            MINSTRET => Self::Minstret,
            MCYCLEH => Self::Mcycleh,
            MINSTRETH => Self::Minstreth,
            DCSR => Self::Dcsr,
            DPC => Self::Dpc,
            DSCRATCH0 => Self::Dscratch0,
            DSCRATCH1 => Self::Dscratch1,
            _ => Self::None,
        }
    }

    /// Feature group gating this CSR.
    pub const fn group(self) -> CsrGroup {
        match self {
            Self::Ustatus
            | Self::Uie
            | Self::Utvec
            | Self::Uscratch
            | Self::Uepc
            | Self::Ucause
            | Self::Utval
            | Self::Uip
            | Self::Medeleg
            | Self::Mideleg => CsrGroup::UserInterrupts,
            Self::Mcounteren => CsrGroup::UserMode,
            Self::Dcsr | Self::Dpc | Self::Dscratch0 | Self::Dscratch1 => CsrGroup::Debug,
            _ => CsrGroup::Base,
        }
    }

    /// Assembler name of the CSR.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "unknown",
            Self::Ustatus => "ustatus",
            Self::Uie => "uie",
            Self::Utvec => "utvec",
            Self::Uscratch => "uscratch",
            Self::Uepc => "uepc",
            Self::Ucause => "ucause",
            Self::Utval => "utval",
            Self::Uip => "uip",
            Self::Cycle => "cycle",
            Self::Time => "time",
            Self::Instret => "instret",
            Self::Cycleh => "cycleh",
            Self::Timeh => "timeh",
            Self::Instreth => "instreth",
            Self::Mvendorid => "mvendorid",
            Self::Marchid => "marchid",
            Self::Mimpid => "mimpid",
            Self::Mhartid => "mhartid",
            Self::Mstatus => "mstatus",
            Self::Misa => "misa",
            Self::Medeleg => "medeleg",
            Self::Mideleg => "mideleg",
            Self::Mie => "mie",
            Self::Mtvec => "mtvec",
            Self::Mcounteren => "mcounteren",
            Self::Mscratch => "mscratch",
            Self::Mepc => "mepc",
            Self::Mcause => "mcause",
            Self::Mtval => "mtval",
            Self::Mip => "mip",
            Self::Mcycle => "mcycle",
            Self::Minstret => "minstret",
            Self::Mcycleh => "mcycleh",
            Self::Minstreth => "minstreth",
            Self::Dcsr => "dcsr",
            Self::Dpc => "dpc",
            Self::Dscratch0 => "dscratch0",
            Self::Dscratch1 => "dscratch1",
        }
    }
}

/// Result of decoding a CSR access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CsrAccess {
    /// 12-bit CSR address.
    pub address: u16,
    /// Access performed.
    pub access: CsrAccessKind,
    /// Selected CSR, `None` when unmapped.
    pub select: CsrSelect,
    /// The access must raise an illegal-instruction trap.
    pub illegal_access: bool,
}

/// Lowest privilege mode encoded in address bits 9:8.
pub const fn csr_minimum_mode(address: u16) -> PrivilegeMode {
    PrivilegeMode::from_u8(((address >> 8) & 0b11) as u8)
}

/// Returns true if address bits 11:10 mark the CSR read-only.
pub const fn csr_is_read_only(address: u16) -> bool {
    (address >> 10) & 0b11 == READ_ONLY_CLASS
}

/// Applies the address-encoded access rule, ignoring which CSRs exist.
///
/// A write of any kind to a read-only address is illegal. When user mode is
/// configured, an access from a mode below the address's minimum privilege is
/// illegal. `CsrAccessKind::None` is never illegal.
pub const fn csr_structural_illegal(
    address: u16,
    access: CsrAccessKind,
    mode: PrivilegeMode,
    config: &CoreConfig,
) -> bool {
    if matches!(access, CsrAccessKind::None) {
        return false;
    }
    if csr_is_read_only(address) && access.writes() {
        return true;
    }
    config.user_mode && (mode as u8) < (csr_minimum_mode(address) as u8)
}

/// Decodes a CSR address for an access performed in `mode`.
///
/// The access is illegal if the address is unmapped, its feature group is
/// disabled, or the structural rule rejects it.
pub fn decode_csr(
    address: u16,
    access: CsrAccessKind,
    mode: PrivilegeMode,
    config: &CoreConfig,
) -> CsrAccess {
    let address = address & CSR_ADDRESS_MASK;
    let select = CsrSelect::from_address(address);

    let illegal_access = select == CsrSelect::None
        || !select.group().enabled(mode, config)
        || csr_structural_illegal(address, access, mode, config);

    if illegal_access {
        trace!(address = format_args!("{address:#05x}"), ?access, %mode, ?select, "illegal CSR access");
    }

    CsrAccess {
        address,
        access,
        select,
        illegal_access,
    }
}
