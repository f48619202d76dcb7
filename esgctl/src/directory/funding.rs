//! Funding opportunity listings, fixed at build time.

use super::FundingOpportunity;

pub static FUNDING_OPPORTUNITIES: &[FundingOpportunity] = &[
    FundingOpportunity {
        name: "Clean Energy Transition Grant",
        provider: "Department of Energy",
        category: "Energy Efficiency",
        status: "Open",
        amount: 500_000,
        description: "Capital grants for replacing fossil-fuel heating with electric alternatives.",
    },
    FundingOpportunity {
        name: "Small Business Solar Rebate",
        provider: "State Energy Office",
        category: "Renewable Energy",
        status: "Open",
        amount: 30_000,
        description: "Rebates covering up to 40% of rooftop solar installation costs.",
    },
    FundingOpportunity {
        name: "Fleet Electrification Fund",
        provider: "Transport Authority",
        category: "Transport",
        status: "Open",
        amount: 250_000,
        description: "Co-funding for replacing diesel delivery vehicles with EVs.",
    },
    FundingOpportunity {
        name: "Circular Economy Pilot Program",
        provider: "Environment Agency",
        category: "Waste Reduction",
        status: "Upcoming",
        amount: 120_000,
        description: "Pilots that divert commercial waste streams from landfill.",
    },
    FundingOpportunity {
        name: "Water Stewardship Initiative",
        provider: "Regional Water Board",
        category: "Water",
        status: "Open",
        amount: 75_000,
        description: "Efficiency upgrades and recycling systems for high water users.",
    },
    FundingOpportunity {
        name: "Green Manufacturing Accelerator",
        provider: "Industry Partnership",
        category: "Energy Efficiency",
        status: "Closed",
        amount: 400_000,
        description: "Process-heat electrification for mid-size manufacturers.",
    },
    FundingOpportunity {
        name: "Net Zero Startup Voucher",
        provider: "Innovation Agency",
        category: "Innovation",
        status: "Open",
        amount: 25_000,
        description: "Vouchers for early-stage companies measuring their footprint for the first time.",
    },
    FundingOpportunity {
        name: "Building Retrofit Partnership",
        provider: "City Council",
        category: "Energy Efficiency",
        status: "Open",
        amount: 200_000,
        description: "Matched funding for insulation, glazing, and HVAC upgrades.",
    },
    FundingOpportunity {
        name: "Regenerative Agriculture Fund",
        provider: "Rural Development Bank",
        category: "Agriculture",
        status: "Upcoming",
        amount: 150_000,
        description: "Soil carbon and cover-cropping programs for food producers.",
    },
    FundingOpportunity {
        name: "Low-GWP Refrigerant Swap Scheme",
        provider: "Environment Agency",
        category: "Refrigerants",
        status: "Open",
        amount: 60_000,
        description: "Subsidies for replacing high-GWP refrigeration systems.",
    },
    FundingOpportunity {
        name: "Community Climate Resilience Fund",
        provider: "National Climate Office",
        category: "Resilience",
        status: "Closed",
        amount: 350_000,
        description: "Adaptation projects protecting local infrastructure.",
    },
    FundingOpportunity {
        name: "Supply Chain Transparency Grant",
        provider: "Trade Commission",
        category: "Innovation",
        status: "Open",
        amount: 90_000,
        description: "Scope 3 data collection tooling across supplier networks.",
    },
    FundingOpportunity {
        name: "Heat Pump Deployment Scheme",
        provider: "Department of Energy",
        category: "Energy Efficiency",
        status: "Upcoming",
        amount: 45_000,
        description: "Per-unit incentives for commercial heat pump installations.",
    },
];
