//! Hardware vendor names and URLs keyed by identifying substrings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vendor {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

/// Matched by substring, first hit wins. Keep specific entries ahead of
/// shorter ones that would also match them.
pub const VENDORS: &[Vendor] = &[
    Vendor {
        id: "ATI",
        name: "ATI Technologies",
        url: "www.ati.com",
    },
    Vendor {
        id: "nVidia",
        name: "NVIDIA",
        url: "www.nvidia.com",
    },
    Vendor {
        id: "3Com",
        name: "3Com",
        url: "www.3com.com",
    },
    Vendor {
        id: "Intel",
        name: "Intel",
        url: "www.intel.com",
    },
    Vendor {
        id: "Cirrus Logic",
        name: "Cirrus Logic",
        url: "www.cirrus.com",
    },
    Vendor {
        id: "VIA Technologies",
        name: "VIA Technologies",
        url: "www.via.com.tw",
    },
    Vendor {
        id: "VIA",
        name: "VIA Technologies",
        url: "www.via.com.tw",
    },
    Vendor {
        id: "hp",
        name: "Hewlett-Packard",
        url: "www.hp.com",
    },
    Vendor {
        id: "NEC Corporation",
        name: "NEC Corporation",
        url: "www.nec.com",
    },
    Vendor {
        id: "MAXTOR",
        name: "MAXTOR",
        url: "www.maxtor.com",
    },
    Vendor {
        id: "SAMSUNG",
        name: "SAMSUNG",
        url: "www.samsung.com",
    },
    Vendor {
        id: "PIONEER",
        name: "PIONEER",
        url: "www.pioneer-eur.com",
    },
    Vendor {
        id: "PLEXTOR",
        name: "PLEXTOR",
        url: "www.plextor.be",
    },
    Vendor {
        id: "Realtek Semiconductor",
        name: "Realtek",
        url: "www.realtek.com.tw",
    },
    Vendor {
        id: "TOSHIBA",
        name: "TOSHIBA",
        url: "www.toshiba.com",
    },
    Vendor {
        id: "LITE-ON",
        name: "LITE-ON",
        url: "www.liteonit.com",
    },
    Vendor {
        id: "WDC",
        name: "Western Digital",
        url: "www.wdc.com",
    },
    Vendor {
        id: "HL-DT-ST",
        name: "LG Electronics",
        url: "www.lge.com",
    },
    Vendor {
        id: "ST",
        name: "SEAGATE",
        url: "www.seagate.com",
    },
    Vendor {
        id: "Lexmark",
        name: "Lexmark",
        url: "www.lexmark.com",
    },
    Vendor {
        id: "_NEC",
        name: "NEC Corporation",
        url: "www.nec.com",
    },
    Vendor {
        id: "Creative Labs",
        name: "Creative Labs",
        url: "www.creative.com",
    },
    Vendor {
        id: "Brooktree",
        name: "Conexant",
        url: "www.brooktree.com",
    },
    Vendor {
        id: "Atheros",
        name: "Atheros Communications",
        url: "www.atheros.com",
    },
    Vendor {
        id: "MATSHITA",
        name: "Panasonic",
        url: "www.panasonic.com",
    },
    Vendor {
        id: "Silicon Image",
        name: "Silicon Image",
        url: "www.siliconimage.com",
    },
    Vendor {
        id: "Silicon Integrated Image",
        name: "Silicon Image",
        url: "www.siliconimage.com",
    },
    Vendor {
        id: "KYE",
        name: "KYE Systems",
        url: "www.genius-kye.com",
    },
    Vendor {
        id: "Broadcom",
        name: "Broadcom",
        url: "www.broadcom.com",
    },
    Vendor {
        id: "Apple",
        name: "Apple",
        url: "www.apple.com",
    },
    Vendor {
        id: "IBM",
        name: "IBM",
        url: "www.ibm.com",
    },
    Vendor {
        id: "Dell",
        name: "Dell Computer",
        url: "www.dell.com",
    },
    Vendor {
        id: "Logitech",
        name: "Logitech International",
        url: "www.logitech.com",
    },
    Vendor {
        id: "FUJITSU",
        name: "Fujitsu",
        url: "www.fujitsu.com",
    },
    Vendor {
        id: "CDU",
        name: "Sony",
        url: "www.sony.com",
    },
    Vendor {
        id: "SanDisk",
        name: "SanDisk",
        url: "www.sandisk.com",
    },
    Vendor {
        id: "ExcelStor",
        name: "ExcelStor Technology",
        url: "www.excelstor.com",
    },
    Vendor {
        id: "D-Link",
        name: "D-Link",
        url: "www.dlink.com.tw",
    },
    Vendor {
        id: "Giga-byte",
        name: "Gigabyte Technology",
        url: "www.gigabyte.com.tw",
    },
    Vendor {
        id: "Gigabyte",
        name: "Gigabyte Technology",
        url: "www.gigabyte.com.tw",
    },
    Vendor {
        id: "C-Media",
        name: "C-Media Electronics",
        url: "www.cmedia.com.tw",
    },
    Vendor {
        id: "Avermedia",
        name: "AVerMedia Technologies",
        url: "www.aver.com",
    },
    Vendor {
        id: "Philips",
        name: "Philips",
        url: "www.philips.com",
    },
    Vendor {
        id: "RaLink",
        name: "Ralink Technology",
        url: "www.ralinktech.com",
    },
    Vendor {
        id: "Siemens",
        name: "Siemens AG",
        url: "www.siemens.com",
    },
    Vendor {
        id: "HP",
        name: "Hewlett-Packard",
        url: "www.hp.com",
    },
    Vendor {
        id: "Hewlett-Packard",
        name: "Hewlett-Packard",
        url: "www.hp.com",
    },
    Vendor {
        id: "TEAC",
        name: "TEAC America",
        url: "www.teac.com",
    },
    Vendor {
        id: "Microsoft",
        name: "Microsoft",
        url: "www.microsoft.com",
    },
    Vendor {
        id: "Memorex",
        name: "Memorex Products",
        url: "www.memorex.com",
    },
    Vendor {
        id: "eMPIA",
        name: "eMPIA Technology",
        url: "www.empiatech.com.tw",
    },
    Vendor {
        id: "Canon",
        name: "Canon",
        url: "www.canon.com",
    },
    Vendor {
        id: "A4Tech",
        name: "A4tech",
        url: "www.a4tech.com",
    },
    Vendor {
        id: "ALCOR",
        name: "Alcor",
        url: "www.alcor.org",
    },
    Vendor {
        id: "Vimicro",
        name: "Vimicro",
        url: "www.vimicro.com",
    },
    Vendor {
        id: "OTi",
        name: "Ours Technology",
        url: "www.oti.com.tw",
    },
    Vendor {
        id: "BENQ",
        name: "BenQ",
        url: "www.benq.com",
    },
    /* BIOS manufacturers */
    Vendor {
        id: "American Megatrends",
        name: "American Megatrends",
        url: "www.ami.com",
    },
    Vendor {
        id: "Award",
        name: "Award Software International",
        url: "www.award-bios.com",
    },
    Vendor {
        id: "Phoenix",
        name: "Phoenix Technologies",
        url: "www.phoenix.com",
    },
];

fn find_vendor(id: &str) -> Option<&'static Vendor> {
    VENDORS.iter().find(|v| id.contains(v.id))
}

/// Canonical vendor name for `id`, or `id` itself when nothing matches.
#[must_use]
pub fn lookup_name(id: Option<&str>) -> Option<&str> {
    let id = id?;
    Some(find_vendor(id).map_or(id, |v| v.name))
}

#[must_use]
pub fn lookup_url(id: Option<&str>) -> Option<&'static str> {
    find_vendor(id?).map(|v| v.url)
}
