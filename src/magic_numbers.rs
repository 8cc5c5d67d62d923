//! Fixed shift "fancy" magic multipliers with overlapping table offsets.
//!
//! Every rook square uses a 12 bit index and every bishop square a 9 bit index, so the
//! shift is constant per slider. The offsets let segments of different squares share
//! slots wherever their used indices never meet, which brings the whole slider table down
//! to 88,772 entries (about 694 KiB) instead of 107,648 for plain magics.
//! These multipliers and offsets were found by Volker Annuss, see
//! <http://www.talkchess.com/forum3/viewtopic.php?p=727500#p727500>.
//!
//! Entries are `(magic, offset)` pairs indexed by square.

/// Size of the shared slider attack table
pub const MAGIC_TABLE_SIZE: usize = 88_772;

pub const ROOK_SHIFT: u32 = 64 - 12;
pub const BISHOP_SHIFT: u32 = 64 - 9;

#[rustfmt::skip]
pub const ROOK_MAGICS: [(u64, usize); 64] = [
    (0x0028_0077_ffeb_fffe, 26304), (0x2004_0102_0109_7fff, 35520),
    (0x0010_0200_1005_3fff, 38592), (0x0040_0400_0800_4002,  8026),
    (0x7fd0_0441_ffff_d003, 22196), (0x4020_0088_87df_fffe, 80870),
    (0x0040_0088_8847_ffff, 76747), (0x0068_00fb_ff75_fffd, 30400),
    (0x0000_2801_0113_ffff, 11115), (0x0020_0402_01fc_ffff, 18205),
    (0x007f_e800_42ff_ffe8, 53577), (0x0000_1800_217f_ffe8, 62724),
    (0x0000_1800_073f_ffe8, 34282), (0x0000_1800_e05f_ffe8, 29196),
    (0x0000_1800_602f_ffe8, 23806), (0x0000_3000_2fff_ffa0, 49481),
    (0x0030_0018_010b_ffff,  2410), (0x0003_000c_0085_fffb, 36498),
    (0x0004_0008_0201_0008, 24478), (0x0004_0020_2002_0004, 10074),
    (0x0001_0020_0200_2001, 79315), (0x0001_0010_0080_1040, 51779),
    (0x0000_0040_4000_8001, 13586), (0x0000_0068_00cd_fff4, 19323),
    (0x0040_2000_1008_0010, 70612), (0x0000_0800_1004_0010, 83652),
    (0x0004_0100_0802_0008, 63110), (0x0000_0400_2020_0200, 34496),
    (0x0002_0080_1010_0100, 84966), (0x0000_0080_2001_0020, 54341),
    (0x0000_0080_2020_0040, 60421), (0x0000_8200_2000_4020, 86402),
    (0x00ff_fd18_0030_0030, 50245), (0x007f_ff7f_bfd4_0020, 76622),
    (0x003f_ffbd_0018_0018, 84676), (0x001f_ffde_8018_0018, 78757),
    (0x000f_ffe0_bfe8_0018, 37346), (0x0001_0000_8020_2001,   370),
    (0x0003_fffb_ff98_0180, 42182), (0x0001_fffd_ff90_00e0, 45385),
    (0x00ff_fefe_ebff_d800, 61659), (0x007f_fff7_ffc0_1400, 12790),
    (0x003f_ffbf_e4ff_e800, 16762), (0x001f_fff0_1fc0_3000,     0),
    (0x000f_ffe7_f8bf_e800, 38380), (0x0007_ffdf_df3f_f808, 11098),
    (0x0003_fff8_5fff_a804, 21803), (0x0001_fffd_75ff_a802, 39189),
    (0x00ff_ffd7_ffeb_ffd8, 58628), (0x007f_ff75_ff7f_bfd8, 44116),
    (0x003f_ff86_3fbf_7fd8, 78357), (0x001f_ffbf_dfd7_ffd8, 44481),
    (0x000f_fff8_1028_0028, 64134), (0x0007_ffd7_f7fe_ffd8, 41759),
    (0x0003_fffc_0c48_0048,  1394), (0x0001_ffff_afd7_ffd8, 40910),
    (0x00ff_ffe4_ffdf_a3ba, 66516), (0x007f_ffef_7ff3_d3da,  3897),
    (0x003f_ffbf_dfef_f7fa,  3930), (0x001f_ffef_f7fb_fc22, 72934),
    (0x0000_0204_0800_1001, 72662), (0x0007_fffe_ffff_77fd, 56325),
    (0x0003_ffff_bf7d_feec, 66501), (0x0001_ffff_9dff_a333, 14826),
];

#[rustfmt::skip]
pub const BISHOP_MAGICS: [(u64, usize); 64] = [
    (0x007f_bfbf_bfbf_bfff,  5378), (0x0000_a060_4010_07fc,  4093),
    (0x0001_0040_0802_0000,  4314), (0x0000_8060_0400_0000,  6587),
    (0x0000_1004_0000_0000,  6491), (0x0000_21c1_00b2_0000,  6330),
    (0x0000_0400_4100_8000,  5609), (0x0000_0fb0_203f_ff80, 22236),
    (0x0000_0401_0040_1004,  6106), (0x0000_0200_8020_0802,  5625),
    (0x0000_0040_1020_2000, 16785), (0x0000_0080_6004_0000, 16817),
    (0x0000_0044_0200_0000,  6842), (0x0000_0008_0100_8000,  7003),
    (0x0000_07ef_e0bf_ff80,  4197), (0x0000_0008_2082_0020,  7356),
    (0x0000_4000_8080_8080,  4602), (0x0002_1f01_0040_0808,  4538),
    (0x0001_8000_c06f_3fff, 29531), (0x0000_2582_0080_1000, 45393),
    (0x0000_2400_8084_0000, 12420), (0x0000_1800_0c03_fff8, 15763),
    (0x0000_0a58_4020_8020,  5050), (0x0000_0200_0820_8020,  4346),
    (0x0000_8040_0081_0100,  6074), (0x0001_0119_0080_2008,  7866),
    (0x0000_8040_0081_0100, 32139), (0x0001_0040_3c04_03ff, 57673),
    (0x0007_8402_a880_2000, 55365), (0x0000_1010_0080_4400, 15818),
    (0x0000_0808_0010_4100,  5562), (0x0000_4004_c008_2008,  6390),
    (0x0001_0101_2000_8020,  7930), (0x0000_8080_9a00_4010, 13329),
    (0x0007_fefe_0881_0010,  7170), (0x0003_ff0f_833f_c080, 27267),
    (0x007f_e080_1900_3042, 53787), (0x003f_ffef_ea00_3000,  5097),
    (0x0000_1010_1000_2080,  6643), (0x0000_8020_0508_0804,  6138),
    (0x0000_8080_80a8_0040,  7418), (0x0000_1041_0020_0040,  7898),
    (0x0003_ffdf_7f83_3fc0, 42012), (0x0000_0088_4045_0020, 57350),
    (0x0000_7ffc_8018_0030, 22813), (0x007f_ffdd_8014_0028, 56693),
    (0x0002_0080_200a_0004,  5818), (0x0000_1010_1010_0020,  7098),
    (0x0007_ffdf_c180_5000,  4451), (0x0003_ffef_e0c0_2200,  4709),
    (0x0000_0008_2080_6000,  4794), (0x0000_0000_0840_3000, 13364),
    (0x0000_0001_0020_2000,  4570), (0x0000_0040_4080_2000,  4282),
    (0x0004_0100_4010_0400, 14964), (0x0000_6020_6018_03f4,  4026),
    (0x0003_ffdf_dfc2_8048,  4826), (0x0000_0008_2082_0020,  7354),
    (0x0000_0000_0820_8060,  4848), (0x0000_0000_0080_8020, 15946),
    (0x0000_0000_0100_2020, 14932), (0x0000_0004_0100_2008, 16588),
    (0x0000_0040_4040_4040,  6905), (0x007f_ff9f_df7f_f813, 16076),
];
