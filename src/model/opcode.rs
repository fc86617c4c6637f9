//! JVM opcodes in their normalized form.
//!
//! The set follows the normalization common to bytecode libraries: the short forms
//! (`ALOAD_0`, `ILOAD_3`, ...) are folded into their operand-carrying counterparts, `WIDE` is
//! implicit, and `LDC_W`/`LDC2_W`/`GOTO_W`/`JSR_W` are folded into `LDC`, `GOTO` and `JSR`. An
//! instruction sequence of the program model therefore never contains those forms.
//!
//! Mnemonics parse case-insensitively and print in upper case.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// What kind of operand an opcode carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandShape {
    /// No operand at all
    None,
    /// A local variable slot
    Var,
    /// An immediate integer (`BIPUSH`, `SIPUSH`, `NEWARRAY`)
    Int,
    /// A constant pool constant (`LDC`)
    Constant,
    /// A branch target
    Jump,
    /// A class or array type (`NEW`, `CHECKCAST`, ...)
    Type,
    /// A field owner/name/descriptor triple
    Field,
    /// A method owner/name/descriptor triple
    Method,
    /// Anything else: `IINC`, switches, `INVOKEDYNAMIC`, `MULTIANEWARRAY`
    Other,
}

/// A normalized JVM opcode.
///
/// The discriminant is the opcode byte from the JVM specification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    #[strum(serialize = "NOP")]
    Nop = 0x00,
    #[strum(serialize = "ACONST_NULL")]
    AconstNull = 0x01,
    #[strum(serialize = "ICONST_M1")]
    IconstM1 = 0x02,
    #[strum(serialize = "ICONST_0")]
    Iconst0 = 0x03,
    #[strum(serialize = "ICONST_1")]
    Iconst1 = 0x04,
    #[strum(serialize = "ICONST_2")]
    Iconst2 = 0x05,
    #[strum(serialize = "ICONST_3")]
    Iconst3 = 0x06,
    #[strum(serialize = "ICONST_4")]
    Iconst4 = 0x07,
    #[strum(serialize = "ICONST_5")]
    Iconst5 = 0x08,
    #[strum(serialize = "LCONST_0")]
    Lconst0 = 0x09,
    #[strum(serialize = "LCONST_1")]
    Lconst1 = 0x0a,
    #[strum(serialize = "FCONST_0")]
    Fconst0 = 0x0b,
    #[strum(serialize = "FCONST_1")]
    Fconst1 = 0x0c,
    #[strum(serialize = "FCONST_2")]
    Fconst2 = 0x0d,
    #[strum(serialize = "DCONST_0")]
    Dconst0 = 0x0e,
    #[strum(serialize = "DCONST_1")]
    Dconst1 = 0x0f,
    #[strum(serialize = "BIPUSH")]
    Bipush = 0x10,
    #[strum(serialize = "SIPUSH")]
    Sipush = 0x11,
    #[strum(serialize = "LDC")]
    Ldc = 0x12,
    #[strum(serialize = "ILOAD")]
    Iload = 0x15,
    #[strum(serialize = "LLOAD")]
    Lload = 0x16,
    #[strum(serialize = "FLOAD")]
    Fload = 0x17,
    #[strum(serialize = "DLOAD")]
    Dload = 0x18,
    #[strum(serialize = "ALOAD")]
    Aload = 0x19,
    #[strum(serialize = "IALOAD")]
    Iaload = 0x2e,
    #[strum(serialize = "LALOAD")]
    Laload = 0x2f,
    #[strum(serialize = "FALOAD")]
    Faload = 0x30,
    #[strum(serialize = "DALOAD")]
    Daload = 0x31,
    #[strum(serialize = "AALOAD")]
    Aaload = 0x32,
    #[strum(serialize = "BALOAD")]
    Baload = 0x33,
    #[strum(serialize = "CALOAD")]
    Caload = 0x34,
    #[strum(serialize = "SALOAD")]
    Saload = 0x35,
    #[strum(serialize = "ISTORE")]
    Istore = 0x36,
    #[strum(serialize = "LSTORE")]
    Lstore = 0x37,
    #[strum(serialize = "FSTORE")]
    Fstore = 0x38,
    #[strum(serialize = "DSTORE")]
    Dstore = 0x39,
    #[strum(serialize = "ASTORE")]
    Astore = 0x3a,
    #[strum(serialize = "IASTORE")]
    Iastore = 0x4f,
    #[strum(serialize = "LASTORE")]
    Lastore = 0x50,
    #[strum(serialize = "FASTORE")]
    Fastore = 0x51,
    #[strum(serialize = "DASTORE")]
    Dastore = 0x52,
    #[strum(serialize = "AASTORE")]
    Aastore = 0x53,
    #[strum(serialize = "BASTORE")]
    Bastore = 0x54,
    #[strum(serialize = "CASTORE")]
    Castore = 0x55,
    #[strum(serialize = "SASTORE")]
    Sastore = 0x56,
    #[strum(serialize = "POP")]
    Pop = 0x57,
    #[strum(serialize = "POP2")]
    Pop2 = 0x58,
    #[strum(serialize = "DUP")]
    Dup = 0x59,
    #[strum(serialize = "DUP_X1")]
    DupX1 = 0x5a,
    #[strum(serialize = "DUP_X2")]
    DupX2 = 0x5b,
    #[strum(serialize = "DUP2")]
    Dup2 = 0x5c,
    #[strum(serialize = "DUP2_X1")]
    Dup2X1 = 0x5d,
    #[strum(serialize = "DUP2_X2")]
    Dup2X2 = 0x5e,
    #[strum(serialize = "SWAP")]
    Swap = 0x5f,
    #[strum(serialize = "IADD")]
    Iadd = 0x60,
    #[strum(serialize = "LADD")]
    Ladd = 0x61,
    #[strum(serialize = "FADD")]
    Fadd = 0x62,
    #[strum(serialize = "DADD")]
    Dadd = 0x63,
    #[strum(serialize = "ISUB")]
    Isub = 0x64,
    #[strum(serialize = "LSUB")]
    Lsub = 0x65,
    #[strum(serialize = "FSUB")]
    Fsub = 0x66,
    #[strum(serialize = "DSUB")]
    Dsub = 0x67,
    #[strum(serialize = "IMUL")]
    Imul = 0x68,
    #[strum(serialize = "LMUL")]
    Lmul = 0x69,
    #[strum(serialize = "FMUL")]
    Fmul = 0x6a,
    #[strum(serialize = "DMUL")]
    Dmul = 0x6b,
    #[strum(serialize = "IDIV")]
    Idiv = 0x6c,
    #[strum(serialize = "LDIV")]
    Ldiv = 0x6d,
    #[strum(serialize = "FDIV")]
    Fdiv = 0x6e,
    #[strum(serialize = "DDIV")]
    Ddiv = 0x6f,
    #[strum(serialize = "IREM")]
    Irem = 0x70,
    #[strum(serialize = "LREM")]
    Lrem = 0x71,
    #[strum(serialize = "FREM")]
    Frem = 0x72,
    #[strum(serialize = "DREM")]
    Drem = 0x73,
    #[strum(serialize = "INEG")]
    Ineg = 0x74,
    #[strum(serialize = "LNEG")]
    Lneg = 0x75,
    #[strum(serialize = "FNEG")]
    Fneg = 0x76,
    #[strum(serialize = "DNEG")]
    Dneg = 0x77,
    #[strum(serialize = "ISHL")]
    Ishl = 0x78,
    #[strum(serialize = "LSHL")]
    Lshl = 0x79,
    #[strum(serialize = "ISHR")]
    Ishr = 0x7a,
    #[strum(serialize = "LSHR")]
    Lshr = 0x7b,
    #[strum(serialize = "IUSHR")]
    Iushr = 0x7c,
    #[strum(serialize = "LUSHR")]
    Lushr = 0x7d,
    #[strum(serialize = "IAND")]
    Iand = 0x7e,
    #[strum(serialize = "LAND")]
    Land = 0x7f,
    #[strum(serialize = "IOR")]
    Ior = 0x80,
    #[strum(serialize = "LOR")]
    Lor = 0x81,
    #[strum(serialize = "IXOR")]
    Ixor = 0x82,
    #[strum(serialize = "LXOR")]
    Lxor = 0x83,
    #[strum(serialize = "IINC")]
    Iinc = 0x84,
    #[strum(serialize = "I2L")]
    I2l = 0x85,
    #[strum(serialize = "I2F")]
    I2f = 0x86,
    #[strum(serialize = "I2D")]
    I2d = 0x87,
    #[strum(serialize = "L2I")]
    L2i = 0x88,
    #[strum(serialize = "L2F")]
    L2f = 0x89,
    #[strum(serialize = "L2D")]
    L2d = 0x8a,
    #[strum(serialize = "F2I")]
    F2i = 0x8b,
    #[strum(serialize = "F2L")]
    F2l = 0x8c,
    #[strum(serialize = "F2D")]
    F2d = 0x8d,
    #[strum(serialize = "D2I")]
    D2i = 0x8e,
    #[strum(serialize = "D2L")]
    D2l = 0x8f,
    #[strum(serialize = "D2F")]
    D2f = 0x90,
    #[strum(serialize = "I2B")]
    I2b = 0x91,
    #[strum(serialize = "I2C")]
    I2c = 0x92,
    #[strum(serialize = "I2S")]
    I2s = 0x93,
    #[strum(serialize = "LCMP")]
    Lcmp = 0x94,
    #[strum(serialize = "FCMPL")]
    Fcmpl = 0x95,
    #[strum(serialize = "FCMPG")]
    Fcmpg = 0x96,
    #[strum(serialize = "DCMPL")]
    Dcmpl = 0x97,
    #[strum(serialize = "DCMPG")]
    Dcmpg = 0x98,
    #[strum(serialize = "IFEQ")]
    Ifeq = 0x99,
    #[strum(serialize = "IFNE")]
    Ifne = 0x9a,
    #[strum(serialize = "IFLT")]
    Iflt = 0x9b,
    #[strum(serialize = "IFGE")]
    Ifge = 0x9c,
    #[strum(serialize = "IFGT")]
    Ifgt = 0x9d,
    #[strum(serialize = "IFLE")]
    Ifle = 0x9e,
    #[strum(serialize = "IF_ICMPEQ")]
    IfIcmpeq = 0x9f,
    #[strum(serialize = "IF_ICMPNE")]
    IfIcmpne = 0xa0,
    #[strum(serialize = "IF_ICMPLT")]
    IfIcmplt = 0xa1,
    #[strum(serialize = "IF_ICMPGE")]
    IfIcmpge = 0xa2,
    #[strum(serialize = "IF_ICMPGT")]
    IfIcmpgt = 0xa3,
    #[strum(serialize = "IF_ICMPLE")]
    IfIcmple = 0xa4,
    #[strum(serialize = "IF_ACMPEQ")]
    IfAcmpeq = 0xa5,
    #[strum(serialize = "IF_ACMPNE")]
    IfAcmpne = 0xa6,
    #[strum(serialize = "GOTO")]
    Goto = 0xa7,
    #[strum(serialize = "JSR")]
    Jsr = 0xa8,
    #[strum(serialize = "RET")]
    Ret = 0xa9,
    #[strum(serialize = "TABLESWITCH")]
    Tableswitch = 0xaa,
    #[strum(serialize = "LOOKUPSWITCH")]
    Lookupswitch = 0xab,
    #[strum(serialize = "IRETURN")]
    Ireturn = 0xac,
    #[strum(serialize = "LRETURN")]
    Lreturn = 0xad,
    #[strum(serialize = "FRETURN")]
    Freturn = 0xae,
    #[strum(serialize = "DRETURN")]
    Dreturn = 0xaf,
    #[strum(serialize = "ARETURN")]
    Areturn = 0xb0,
    #[strum(serialize = "RETURN")]
    Return = 0xb1,
    #[strum(serialize = "GETSTATIC")]
    Getstatic = 0xb2,
    #[strum(serialize = "PUTSTATIC")]
    Putstatic = 0xb3,
    #[strum(serialize = "GETFIELD")]
    Getfield = 0xb4,
    #[strum(serialize = "PUTFIELD")]
    Putfield = 0xb5,
    #[strum(serialize = "INVOKEVIRTUAL")]
    Invokevirtual = 0xb6,
    #[strum(serialize = "INVOKESPECIAL")]
    Invokespecial = 0xb7,
    #[strum(serialize = "INVOKESTATIC")]
    Invokestatic = 0xb8,
    #[strum(serialize = "INVOKEINTERFACE")]
    Invokeinterface = 0xb9,
    #[strum(serialize = "INVOKEDYNAMIC")]
    Invokedynamic = 0xba,
    #[strum(serialize = "NEW")]
    New = 0xbb,
    #[strum(serialize = "NEWARRAY")]
    Newarray = 0xbc,
    #[strum(serialize = "ANEWARRAY")]
    Anewarray = 0xbd,
    #[strum(serialize = "ARRAYLENGTH")]
    Arraylength = 0xbe,
    #[strum(serialize = "ATHROW")]
    Athrow = 0xbf,
    #[strum(serialize = "CHECKCAST")]
    Checkcast = 0xc0,
    #[strum(serialize = "INSTANCEOF")]
    Instanceof = 0xc1,
    #[strum(serialize = "MONITORENTER")]
    Monitorenter = 0xc2,
    #[strum(serialize = "MONITOREXIT")]
    Monitorexit = 0xc3,
    #[strum(serialize = "MULTIANEWARRAY")]
    Multianewarray = 0xc5,
    #[strum(serialize = "IFNULL")]
    Ifnull = 0xc6,
    #[strum(serialize = "IFNONNULL")]
    Ifnonnull = 0xc7,
}

impl Opcode {
    /// The opcode byte as defined by the JVM specification.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The upper case mnemonic, e.g. `"INVOKEVIRTUAL"`.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        self.into()
    }

    /// What kind of operand instructions with this opcode carry.
    #[must_use]
    pub const fn shape(self) -> OperandShape {
        use Opcode::*;
        match self {
            Iload | Lload | Fload | Dload | Aload | Istore | Lstore | Fstore | Dstore | Astore
            | Ret => OperandShape::Var,
            Bipush | Sipush | Newarray => OperandShape::Int,
            Ldc => OperandShape::Constant,
            Ifeq | Ifne | Iflt | Ifge | Ifgt | Ifle | IfIcmpeq | IfIcmpne | IfIcmplt
            | IfIcmpge | IfIcmpgt | IfIcmple | IfAcmpeq | IfAcmpne | Goto | Jsr | Ifnull
            | Ifnonnull => OperandShape::Jump,
            New | Anewarray | Checkcast | Instanceof => OperandShape::Type,
            Getstatic | Putstatic | Getfield | Putfield => OperandShape::Field,
            Invokevirtual | Invokespecial | Invokestatic | Invokeinterface => {
                OperandShape::Method
            }
            Iinc | Tableswitch | Lookupswitch | Invokedynamic | Multianewarray => {
                OperandShape::Other
            }
            _ => OperandShape::None,
        }
    }

    /// Returns true for the local variable loads and stores (`ILOAD` ... `ASTORE`).
    ///
    /// `RET` also addresses a local variable but is not a load or store.
    #[must_use]
    pub const fn is_load_or_store(self) -> bool {
        matches!(self.shape(), OperandShape::Var) && !matches!(self, Opcode::Ret)
    }

    /// Returns true for the `*RETURN` family.
    #[must_use]
    pub const fn is_return(self) -> bool {
        matches!(
            self,
            Opcode::Ireturn
                | Opcode::Lreturn
                | Opcode::Freturn
                | Opcode::Dreturn
                | Opcode::Areturn
                | Opcode::Return
        )
    }
}

impl TryFrom<String> for Opcode {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
