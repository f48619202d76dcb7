//! Marketplace company listings, fixed at build time.

use super::MarketplaceCompany;

pub static MARKETPLACE_COMPANIES: &[MarketplaceCompany] = &[
    MarketplaceCompany {
        name: "CarbonTrace Analytics",
        industry: "Technology",
        location: "USA",
        description: "Automated carbon accounting for software-heavy businesses.",
        website: "https://carbontrace.example.com",
    },
    MarketplaceCompany {
        name: "GreenGrid Energy",
        industry: "Energy",
        location: "USA",
        description: "On-site solar and battery installations for commercial sites.",
        website: "https://greengrid.example.com",
    },
    MarketplaceCompany {
        name: "Veridian Offsets",
        industry: "Environmental Services",
        location: "Australia",
        description: "Verified reforestation and soil carbon offset projects.",
        website: "https://veridian.example.com",
    },
    MarketplaceCompany {
        name: "BlueCycle Water",
        industry: "Utilities",
        location: "UK",
        description: "Greywater recycling systems for office buildings.",
        website: "https://bluecycle.example.com",
    },
    MarketplaceCompany {
        name: "Loop Logistics",
        industry: "Transport",
        location: "Germany",
        description: "Electric last-mile delivery fleets with emissions reporting.",
        website: "https://looplogistics.example.com",
    },
    MarketplaceCompany {
        name: "Evergreen Packaging Co",
        industry: "Manufacturing",
        location: "USA",
        description: "Compostable packaging made from agricultural waste streams.",
        website: "https://evergreenpack.example.com",
    },
    MarketplaceCompany {
        name: "Helios Metering",
        industry: "Technology",
        location: "USA",
        description: "Sub-metering hardware for building-level energy visibility.",
        website: "https://heliosmetering.example.com",
    },
    MarketplaceCompany {
        name: "TerraFirm Consulting",
        industry: "Professional Services",
        location: "Australia",
        description: "Climate disclosure and reporting framework advisory.",
        website: "https://terrafirm.example.com",
    },
    MarketplaceCompany {
        name: "Windward Renewables",
        industry: "Energy",
        location: "UK",
        description: "Power purchase agreements from community wind farms.",
        website: "https://windward.example.com",
    },
    MarketplaceCompany {
        name: "ClearSky Refrigerants",
        industry: "Manufacturing",
        location: "Germany",
        description: "Low-GWP refrigerant retrofits for commercial cooling.",
        website: "https://clearsky.example.com",
    },
    MarketplaceCompany {
        name: "Sprout Catering",
        industry: "Hospitality",
        location: "Australia",
        description: "Zero-waste corporate catering with local sourcing.",
        website: "https://sproutcatering.example.com",
    },
    MarketplaceCompany {
        name: "Circuit Carbon Labs",
        industry: "Technology",
        location: "Canada",
        description: "Lifecycle emissions analysis for electronics manufacturers.",
        website: "https://circuitcarbon.example.com",
    },
    MarketplaceCompany {
        name: "Meridian Waste Solutions",
        industry: "Environmental Services",
        location: "USA",
        description: "Commercial composting and waste-stream audits.",
        website: "https://meridianwaste.example.com",
    },
    MarketplaceCompany {
        name: "Farrow Fleet Electric",
        industry: "Transport",
        location: "UK",
        description: "Fleet electrification planning and charging infrastructure.",
        website: "https://farrowfleet.example.com",
    },
    MarketplaceCompany {
        name: "Northlight Paper",
        industry: "Manufacturing",
        location: "Canada",
        description: "FSC-certified recycled paper products for offices.",
        website: "https://northlightpaper.example.com",
    },
    MarketplaceCompany {
        name: "Atlas ESG Software",
        industry: "Technology",
        location: "Germany",
        description: "Supply-chain ESG scoring and supplier questionnaires.",
        website: "https://atlasesg.example.com",
    },
];
